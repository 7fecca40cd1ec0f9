//! Form controller: selection state machine, validation gate and the four
//! actions (create, update, delete, refresh).
//!
//! The controller owns the current list, the current selection and the form
//! fields. Rendering reads it; key handling calls into it. Every repository
//! call happens synchronously from these methods.

use crate::app::{
    subvention_count, subvention_delete, subvention_find_all, subvention_find_by_id,
    subvention_insert, subvention_sum_amount, subvention_update,
};
use crate::domain::{SubsidyType, Subvention};
use crate::error::AppError;
use crate::infra::DbPool;
use crate::ui::validation::{validate_form, Field, FieldError};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;

/// Which widget receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Country,
    SubsidyType,
    Amount,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Self::Table => Self::Country,
            Self::Country => Self::SubsidyType,
            Self::SubsidyType => Self::Amount,
            Self::Amount => Self::Table,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Table => Self::Amount,
            Self::Country => Self::Table,
            Self::SubsidyType => Self::Country,
            Self::Amount => Self::SubsidyType,
        }
    }
}

impl From<Field> for Focus {
    fn from(field: Field) -> Self {
        match field {
            Field::Country => Self::Country,
            Field::SubsidyType => Self::SubsidyType,
            Field::Amount => Self::Amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub country: String,
    pub subsidy_type: SubsidyType,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Validation,
    Error,
}

/// A dismissable message shown over the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub count: i64,
    pub total: Decimal,
}

/// Result of a user action, mostly for callers that want more than the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(i64),
    Cleared,
    Created(i64),
    Updated(i64),
    Deleted(i64),
    Refreshed,
    NeedsConfirmation(i64),
    Cancelled,
    NotFound(i64),
    Invalid(FieldError),
    Failed,
    /// The action is disabled in the current state.
    Ignored,
}

pub struct FormController<'a> {
    pool: &'a DbPool,
    records: Vec<Subvention>,
    selected: Option<i64>,
    form: FormFields,
    stats: Stats,
    focus: Focus,
    message: Option<Message>,
    pending_delete: Option<i64>,
    last_refresh: Option<DateTime<Local>>,
}

impl<'a> FormController<'a> {
    /// Does not touch the database; call [`refresh`](Self::refresh) to load.
    pub fn new(pool: &'a DbPool) -> Self {
        Self {
            pool,
            records: Vec::new(),
            selected: None,
            form: FormFields::default(),
            stats: Stats::default(),
            focus: Focus::Table,
            message: None,
            pending_delete: None,
            last_refresh: None,
        }
    }

    pub fn records(&self) -> &[Subvention] {
        &self.records
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.records.iter().position(|r| r.id == Some(id))
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    pub fn is_connected(&self) -> bool {
        self.pool.is_connected()
    }

    pub fn can_create(&self) -> bool {
        true
    }

    pub fn can_update(&self) -> bool {
        self.selected.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.selected.is_some()
    }

    // ── Loading ──────────────────────────────────────────────

    /// Reload the whole list and the statistics, then clear the selection.
    /// On failure the previous list, statistics, selection and form are kept.
    pub fn refresh(&mut self) -> Outcome {
        self.message = None;
        match self.load() {
            Ok(()) => {
                self.clear_selection();
                Outcome::Refreshed
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Could not load subventions: {}", e)));
                Outcome::Failed
            }
        }
    }

    fn load(&mut self) -> Result<(), AppError> {
        let records = subvention_find_all(self.pool)?;
        let count = subvention_count(self.pool)?;
        let total = subvention_sum_amount(self.pool)?;
        self.records = records;
        self.stats = Stats { count, total };
        self.last_refresh = Some(Local::now());
        Ok(())
    }

    /// After a successful mutation: back to no selection, then reload.
    /// `done` describes the mutation, e.g. "Subvention 3 deleted".
    fn reload_after_mutation(&mut self, done: &str) {
        self.clear_selection();
        if let Err(e) = self.load() {
            self.message = Some(Message::error(format!(
                "{}, but the list could not be reloaded: {}",
                done, e
            )));
        }
    }

    // ── Selection ────────────────────────────────────────────

    /// Select a row by id (re-fetched from the database) or clear the selection.
    pub fn select(&mut self, id: Option<i64>) -> Outcome {
        self.message = None;
        let Some(id) = id else {
            self.clear_selection();
            return Outcome::Cleared;
        };
        match subvention_find_by_id(self.pool, id) {
            Ok(record) => {
                self.selected = Some(id);
                self.pending_delete = None;
                self.form = FormFields {
                    country: record.country.clone(),
                    subsidy_type: record.known_type().unwrap_or_else(|| {
                        log::warn!(
                            "Subvention {} has unlisted type {:?}",
                            id,
                            record.subsidy_type
                        );
                        SubsidyType::default()
                    }),
                    amount: record.amount.to_string(),
                };
                Outcome::Selected(id)
            }
            Err(AppError::NotFound(_)) => {
                self.clear_selection();
                self.refresh();
                self.message = Some(Message::info(format!(
                    "Subvention {} no longer exists",
                    id
                )));
                Outcome::NotFound(id)
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Could not load subvention: {}", e)));
                Outcome::Failed
            }
        }
    }

    pub fn select_next(&mut self) -> Outcome {
        let next = match self.selected_index() {
            Some(i) if i + 1 < self.records.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.select_index(next)
    }

    pub fn select_prev(&mut self) -> Outcome {
        let prev = match self.selected_index() {
            Some(i) => i.saturating_sub(1),
            None => self.records.len().saturating_sub(1),
        };
        self.select_index(prev)
    }

    fn select_index(&mut self, index: usize) -> Outcome {
        match self.records.get(index).and_then(|r| r.id) {
            Some(id) => self.select(Some(id)),
            None => Outcome::Ignored,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.pending_delete = None;
        self.form = FormFields::default();
    }

    // ── Form editing ─────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn set_country(&mut self, country: &str) {
        self.form.country = country.to_string();
    }

    pub fn set_amount_text(&mut self, amount: &str) {
        self.form.amount = amount.to_string();
    }

    pub fn set_subsidy_type(&mut self, subsidy_type: SubsidyType) {
        self.form.subsidy_type = subsidy_type;
    }

    pub fn cycle_subsidy_type(&mut self, forward: bool) {
        self.form.subsidy_type = if forward {
            self.form.subsidy_type.next()
        } else {
            self.form.subsidy_type.prev()
        };
    }

    /// Type a character into the focused text field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Focus::Country => self.form.country.push(c),
            Focus::Amount => self.form.amount.push(c),
            Focus::Table | Focus::SubsidyType => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::Country => {
                self.form.country.pop();
            }
            Focus::Amount => {
                self.form.amount.pop();
            }
            Focus::Table | Focus::SubsidyType => {}
        }
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    fn reject(&mut self, err: FieldError) -> Outcome {
        log::debug!("Form rejected: {}", err);
        self.focus = err.field().into();
        self.message = Some(Message {
            kind: MessageKind::Validation,
            text: err.to_string(),
        });
        Outcome::Invalid(err)
    }

    // ── Actions ──────────────────────────────────────────────

    pub fn create(&mut self) -> Outcome {
        self.message = None;
        let (country, amount) = match validate_form(&self.form.country, &self.form.amount) {
            Ok(valid) => valid,
            Err(e) => return self.reject(e),
        };
        let mut record = Subvention::new(country, self.form.subsidy_type, amount);
        match subvention_insert(self.pool, &mut record) {
            Ok(id) => {
                self.reload_after_mutation(&format!("Subvention {} created", id));
                self.message
                    .get_or_insert_with(|| Message::info(format!("Subvention created (ID: {})", id)));
                Outcome::Created(id)
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Could not create subvention: {}", e)));
                Outcome::Failed
            }
        }
    }

    pub fn update(&mut self) -> Outcome {
        self.message = None;
        let Some(id) = self.selected else {
            self.message = Some(Message::info("Select a subvention first"));
            return Outcome::Ignored;
        };
        let (country, amount) = match validate_form(&self.form.country, &self.form.amount) {
            Ok(valid) => valid,
            Err(e) => return self.reject(e),
        };
        let record = Subvention::new(country, self.form.subsidy_type, amount).with_id(id);
        match subvention_update(self.pool, &record) {
            Ok(()) => {
                self.reload_after_mutation(&format!("Subvention {} updated", id));
                self.message
                    .get_or_insert_with(|| Message::info(format!("Subvention {} updated", id)));
                Outcome::Updated(id)
            }
            Err(AppError::NotFound(_)) => {
                self.message = Some(Message::info(format!("Subvention {} was not found", id)));
                Outcome::NotFound(id)
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Could not update subvention: {}", e)));
                Outcome::Failed
            }
        }
    }

    /// First step of delete: ask for confirmation. Nothing is deleted yet.
    pub fn request_delete(&mut self) -> Outcome {
        self.message = None;
        match self.selected {
            Some(id) => {
                self.pending_delete = Some(id);
                Outcome::NeedsConfirmation(id)
            }
            None => {
                self.message = Some(Message::info("Select a subvention first"));
                Outcome::Ignored
            }
        }
    }

    pub fn cancel_delete(&mut self) -> Outcome {
        match self.pending_delete.take() {
            Some(_) => Outcome::Cancelled,
            None => Outcome::Ignored,
        }
    }

    pub fn confirm_delete(&mut self) -> Outcome {
        self.message = None;
        let Some(id) = self.pending_delete.take() else {
            return Outcome::Ignored;
        };
        match subvention_delete(self.pool, id) {
            Ok(()) => {
                self.reload_after_mutation(&format!("Subvention {} deleted", id));
                self.message
                    .get_or_insert_with(|| Message::info(format!("Subvention {} deleted", id)));
                Outcome::Deleted(id)
            }
            Err(AppError::NotFound(_)) => {
                self.message = Some(Message::info(format!("Subvention {} was not found", id)));
                Outcome::NotFound(id)
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Could not delete subvention: {}", e)));
                Outcome::Failed
            }
        }
    }
}
