//! Error types for query assembly and dictionary construction.

use crate::query::QueryKind;

/// Errors returned by the query builders.
///
/// Every variant describes a caller-side shape problem; the builders never
/// inspect identifiers beyond checking that required ones are present.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The grouping area level was empty.
    #[error("area level must not be empty")]
    EmptyAreaLevel,

    /// No variable identifiers were supplied.
    #[error("variable list must not be empty")]
    EmptyVariables,

    /// A counter query named no entity to count.
    #[error("counted entity must not be empty")]
    EmptyCountedEntity,

    /// An area filter mapping did not have exactly one area type key.
    #[error("area filter must name exactly one area type, got {keys}")]
    AreaFilterShape { keys: usize },

    /// An area filter named an area type but listed no codes for it.
    #[error("area filter for '{area_type}' lists no area codes")]
    EmptyAreaCodes { area_type: String },

    /// The query kind is recognized but has no builder yet.
    #[error("query kind '{0}' is reserved and not yet implemented")]
    Reserved(QueryKind),
}

/// Errors returned while building or annotating the metadata dictionary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    /// A metadata row had an empty entity code (rows are 1-based).
    #[error("metadata row {row}: missing entity code")]
    MissingEntityCode { row: usize },

    /// Two separate row groups used the same entity name.
    #[error("entity '{name}' is declared by more than one row group (row {row})")]
    DuplicateEntity { name: String, row: usize },

    /// An entity listed the same variable twice.
    #[error("variable '{entity}.{variable}' is declared twice (row {row})")]
    DuplicateVariable {
        entity: String,
        variable: String,
        row: usize,
    },

    /// The last entity carries geographic variables although the layout
    /// fixes it as a data entity.
    #[error(
        "trailing entity '{name}' declares geographic variables but the layout fixes it as a data entity"
    )]
    TrailingEntityGeographic { name: String },

    /// A category block named an entity missing from the dictionary.
    #[error("category text line {line}: unknown entity '{entity}'")]
    UnknownEntity { entity: String, line: usize },

    /// A category block named a variable missing from its entity.
    #[error("category text line {line}: unknown variable '{entity}.{variable}'")]
    UnknownVariable {
        entity: String,
        variable: String,
        line: usize,
    },

    /// The metadata source failed to deliver rows or category text.
    #[error("metadata source error: {0}")]
    Source(String),
}
