//! Subvention record and the subsidy categories offered by the form.

use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubsidyType {
    #[default]
    Agricultural,
    Industrial,
    Technological,
    Educational,
    Health,
    Infrastructure,
    Environmental,
    Cultural,
    Research,
}

impl SubsidyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agricultural => "Agricultural",
            Self::Industrial => "Industrial",
            Self::Technological => "Technological",
            Self::Educational => "Educational",
            Self::Health => "Health",
            Self::Infrastructure => "Infrastructure",
            Self::Environmental => "Environmental",
            Self::Cultural => "Cultural",
            Self::Research => "Research",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Agricultural,
            Self::Industrial,
            Self::Technological,
            Self::Educational,
            Self::Health,
            Self::Infrastructure,
            Self::Environmental,
            Self::Cultural,
            Self::Research,
        ]
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    /// Next category in picker order, wrapping around.
    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous category in picker order, wrapping around.
    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for SubsidyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `subvenciones`.
///
/// `subsidy_type` stays free text: the form only offers [`SubsidyType`]
/// values, but rows written by other tools may hold anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subvention {
    /// `None` until the row has been inserted.
    pub id: Option<i64>,
    pub country: String,
    pub subsidy_type: String,
    pub amount: Decimal,
}

impl Subvention {
    pub fn new(country: impl Into<String>, subsidy_type: SubsidyType, amount: Decimal) -> Self {
        Self {
            id: None,
            country: country.into(),
            subsidy_type: subsidy_type.as_str().to_string(),
            amount,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// The stored type, if it is one the form knows.
    pub fn known_type(&self) -> Option<SubsidyType> {
        SubsidyType::from_str(&self.subsidy_type)
    }
}
