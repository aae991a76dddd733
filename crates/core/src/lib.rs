//! redatam-core: REDATAM query builder and census metadata dictionary.
//!
//! Two independent components that share the vocabulary of the REDATAM
//! query language:
//!
//! - [`query`] -- assemble query documents (AREALIST, counter, MEDIAN) from
//!   structured parameters
//! - [`dictionary`] -- build the entity/variable/category catalog from the
//!   metadata table and the category text feed
//!
//! # Public API
//!
//! - [`build_area_list()`], [`build_counter()`], [`build_median()`],
//!   [`build_query()`] -- query builders
//! - [`QueryKind`] -- supported and reserved query kinds
//! - [`build_dictionary()`] / [`attach_categories()`] -- the two dictionary
//!   passes; [`build_catalog()`] runs both against a [`MetadataSource`]
//! - [`QueryError`], [`DictionaryError`] -- error types

pub mod dictionary;
pub mod error;
pub mod query;

// ── Convenience re-exports: key types ────────────────────────────────

pub use dictionary::{
    Category, CategoryMode, CategoryRequest, Dictionary, DictionaryBuild, DictionaryLayout,
    Entity, EntityKind, MetadataRow, MetadataSource, TrailingEntity, Variable,
};
pub use error::{DictionaryError, QueryError};
pub use query::{
    AreaCodes, AreaFilter, AreaListQuery, CounterQuery, MedianQuery, QueryKind, QueryRequest,
    VariableList,
};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use dictionary::{attach_categories, build_catalog, build_dictionary};
pub use query::{build_area_list, build_counter, build_median, build_query};
