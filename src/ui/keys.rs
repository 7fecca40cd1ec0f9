//! Key bindings: terminal key events to controller actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::controller::{Focus, FormController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissMessage,
    ConfirmDelete,
    CancelDelete,
    Create,
    Update,
    RequestDelete,
    Refresh,
    FocusNext,
    FocusPrev,
    SelectNext,
    SelectPrev,
    ClearSelection,
    NextType,
    PrevType,
    Input(char),
    Backspace,
}

/// What the key handler needs to know about the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub focus: Focus,
    pub message_open: bool,
    pub confirming: bool,
}

impl KeyContext {
    pub fn of(ctl: &FormController) -> Self {
        Self {
            focus: ctl.focus(),
            message_open: ctl.message().is_some(),
            confirming: ctl.pending_delete().is_some(),
        }
    }
}

pub fn action_for(key: KeyEvent, ctx: KeyContext) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if ctx.confirming {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CancelDelete),
            _ => None,
        };
    }

    if ctx.message_open {
        return Some(Action::DismissMessage);
    }

    match (key.code, ctx.focus) {
        (KeyCode::F(10), _) => Some(Action::Quit),
        (KeyCode::F(2), _) => Some(Action::Create),
        (KeyCode::F(3), _) => Some(Action::Update),
        (KeyCode::F(4), _) | (KeyCode::Delete, Focus::Table) => Some(Action::RequestDelete),
        (KeyCode::F(5), _) => Some(Action::Refresh),
        (KeyCode::Tab, _) => Some(Action::FocusNext),
        (KeyCode::BackTab, _) => Some(Action::FocusPrev),
        (KeyCode::Esc, _) => Some(Action::ClearSelection),
        (KeyCode::Down, Focus::Table) => Some(Action::SelectNext),
        (KeyCode::Up, Focus::Table) => Some(Action::SelectPrev),
        (KeyCode::Right, Focus::SubsidyType) | (KeyCode::Char(' '), Focus::SubsidyType) => {
            Some(Action::NextType)
        }
        (KeyCode::Left, Focus::SubsidyType) => Some(Action::PrevType),
        (KeyCode::Backspace, Focus::Country | Focus::Amount) => Some(Action::Backspace),
        (KeyCode::Char(c), Focus::Country | Focus::Amount)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Action::Input(c))
        }
        _ => None,
    }
}

/// Run `action` against the controller. Returns true when the app should quit.
pub fn apply(ctl: &mut FormController, action: Action) -> bool {
    match action {
        Action::Quit => return true,
        Action::DismissMessage => ctl.dismiss_message(),
        Action::ConfirmDelete => {
            ctl.confirm_delete();
        }
        Action::CancelDelete => {
            ctl.cancel_delete();
        }
        Action::Create => {
            ctl.create();
        }
        Action::Update => {
            ctl.update();
        }
        Action::RequestDelete => {
            ctl.request_delete();
        }
        Action::Refresh => {
            ctl.refresh();
        }
        Action::FocusNext => ctl.focus_next(),
        Action::FocusPrev => ctl.focus_prev(),
        Action::SelectNext => {
            ctl.select_next();
        }
        Action::SelectPrev => {
            ctl.select_prev();
        }
        Action::ClearSelection => {
            ctl.select(None);
        }
        Action::NextType => ctl.cycle_subsidy_type(true),
        Action::PrevType => ctl.cycle_subsidy_type(false),
        Action::Input(c) => ctl.input_char(c),
        Action::Backspace => ctl.backspace(),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx(focus: Focus) -> KeyContext {
        KeyContext {
            focus,
            message_open: false,
            confirming: false,
        }
    }

    #[test]
    fn function_keys_map_to_the_four_actions() {
        let c = ctx(Focus::Table);
        assert_eq!(action_for(key(KeyCode::F(2)), c), Some(Action::Create));
        assert_eq!(action_for(key(KeyCode::F(3)), c), Some(Action::Update));
        assert_eq!(action_for(key(KeyCode::F(4)), c), Some(Action::RequestDelete));
        assert_eq!(action_for(key(KeyCode::F(5)), c), Some(Action::Refresh));
    }

    #[test]
    fn typing_goes_to_text_fields_only() {
        assert_eq!(
            action_for(key(KeyCode::Char('x')), ctx(Focus::Country)),
            Some(Action::Input('x'))
        );
        assert_eq!(
            action_for(key(KeyCode::Char('7')), ctx(Focus::Amount)),
            Some(Action::Input('7'))
        );
        assert_eq!(action_for(key(KeyCode::Char('x')), ctx(Focus::Table)), None);
    }

    #[test]
    fn confirmation_only_accepts_yes_or_no() {
        let c = KeyContext {
            confirming: true,
            ..ctx(Focus::Table)
        };
        assert_eq!(action_for(key(KeyCode::Char('y')), c), Some(Action::ConfirmDelete));
        assert_eq!(action_for(key(KeyCode::Esc), c), Some(Action::CancelDelete));
        assert_eq!(action_for(key(KeyCode::F(2)), c), None);
    }

    #[test]
    fn any_key_dismisses_an_open_message() {
        let c = KeyContext {
            message_open: true,
            ..ctx(Focus::Amount)
        };
        assert_eq!(action_for(key(KeyCode::F(2)), c), Some(Action::DismissMessage));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let c = KeyContext {
            confirming: true,
            ..ctx(Focus::Country)
        };
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ev, c), Some(Action::Quit));
    }
}
