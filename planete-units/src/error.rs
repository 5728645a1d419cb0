//! Catalog construction errors

use thiserror::Error;

/// A data-authoring defect found while building a catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Two entries share the same identity key
    #[error("duplicate {kind} name: {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    /// Two entries share an abbreviation, which would make lookups ambiguous
    #[error("duplicate {kind} abbreviation: {abbreviation:?}")]
    DuplicateAbbreviation { kind: &'static str, abbreviation: String },

    /// An entry has an empty or whitespace-only name
    #[error("{kind} at position {index} has an empty name")]
    EmptyName { kind: &'static str, index: usize },

    /// A scale factor is zero, NaN or infinite
    #[error("{kind} {name:?} has invalid scale {value}")]
    InvalidScale { kind: &'static str, name: String, value: f64 },
}
