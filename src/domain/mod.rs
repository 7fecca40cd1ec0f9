//! Domain types.

pub mod subvention;

pub use subvention::{SubsidyType, Subvention};
