//! REDATAM query builder.
//!
//! Turns caller-validated parameters into query documents ready to paste
//! into a REDATAM query processor. Nothing here performs I/O.

pub mod builders;
pub mod document;
pub mod kind;
pub mod params;

pub use builders::{
    build_area_list, build_counter, build_cross, build_frequencies, build_mean, build_median,
    build_query, build_stats, AreaListQuery, CounterQuery, MedianQuery, QueryRequest,
};
pub use document::QueryDocument;
pub use kind::{QueryKind, UnknownQueryKind};
pub use params::{AreaCodes, AreaFilter, VariableList};
