//! Currency display policy.

use rust_decimal::Decimal;
use std::fmt;

/// Locales with known number conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EsEs,
    EnUs,
    EnGb,
    DeDe,
    FrFr,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "es-es" => Some(Self::EsEs),
            "en-us" => Some(Self::EnUs),
            "en-gb" => Some(Self::EnGb),
            "de-de" => Some(Self::DeDe),
            "fr-fr" => Some(Self::FrFr),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::EsEs => "es-ES",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Self::EsEs | Self::DeDe => '.',
            Self::EnUs | Self::EnGb => ',',
            Self::FrFr => ' ',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Self::EsEs | Self::DeDe | Self::FrFr => ',',
            Self::EnUs | Self::EnGb => '.',
        }
    }

    fn symbol_first(&self) -> bool {
        matches!(self, Self::EnUs | Self::EnGb)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    locale: Locale,
    currency: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(Locale::EsEs, "EUR")
    }
}

impl CurrencyFormat {
    pub fn new(locale: Locale, currency: &str) -> Self {
        Self {
            locale,
            currency: currency.trim().to_ascii_uppercase(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn symbol(&self) -> &str {
        match self.currency.as_str() {
            "EUR" => "€",
            "USD" => "$",
            "GBP" => "£",
            "JPY" => "¥",
            other => other,
        }
    }

    /// Render `amount` rounded half-even to cents, e.g. `1.234,50 €` for es-ES.
    pub fn format(&self, amount: Decimal) -> String {
        let mut cents = amount.round_dp(2);
        cents.rescale(2);
        let negative = cents.is_sign_negative() && !cents.is_zero();
        let digits = cents.abs().to_string();
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut number = group_digits(int_part, self.locale.group_separator());
        number.push(self.locale.decimal_separator());
        number.push_str(frac_part);

        let sign = if negative { "-" } else { "" };
        if self.locale.symbol_first() {
            format!("{}{}{}", sign, self.symbol(), number)
        } else {
            format!("{}{} {}", sign, number, self.symbol())
        }
    }
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
