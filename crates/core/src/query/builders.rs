//! Query builders: structured parameters in, REDATAM query text out.

use serde::{Deserialize, Serialize};

use super::document::{Define, OfClause, QueryDocument, Rundef, Table, TableKind};
use super::kind::QueryKind;
use super::params::{AreaFilter, VariableList};
use crate::error::QueryError;

// ──────────────────────────────────────────────
// Parameters
// ──────────────────────────────────────────────

/// Parameters of an AREALIST query: the requested variables for each area
/// at `area_level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaListQuery {
    pub area_level: String,
    pub variables: VariableList,
    #[serde(default)]
    pub area_filter: Option<AreaFilter>,
    #[serde(default)]
    pub universe_filter: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Prepend `<area_level>.NOM<area_level>` to the variable list.
    #[serde(default)]
    pub include_area_name: bool,
}

impl AreaListQuery {
    pub fn new(area_level: impl Into<String>, variables: impl Into<VariableList>) -> Self {
        AreaListQuery {
            area_level: area_level.into(),
            variables: variables.into(),
            area_filter: None,
            universe_filter: None,
            title: None,
            include_area_name: false,
        }
    }
}

/// Parameters of a counter query: an AREALIST of the number of
/// `counted_entity` records in each area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterQuery {
    pub area_level: String,
    pub counted_entity: String,
    #[serde(default)]
    pub area_filter: Option<AreaFilter>,
    #[serde(default)]
    pub universe_filter: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub include_area_name: bool,
    /// Append a grand total line.
    #[serde(default)]
    pub include_total: bool,
}

impl CounterQuery {
    pub fn new(area_level: impl Into<String>, counted_entity: impl Into<String>) -> Self {
        CounterQuery {
            area_level: area_level.into(),
            counted_entity: counted_entity.into(),
            area_filter: None,
            universe_filter: None,
            title: None,
            include_area_name: false,
            include_total: false,
        }
    }
}

/// Parameters of a MEDIAN query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedianQuery {
    pub variable: String,
    #[serde(default)]
    pub by_var1: Option<String>,
    #[serde(default)]
    pub by_var2: Option<String>,
    /// Print category names instead of codes.
    #[serde(default)]
    pub include_full_names: bool,
    #[serde(default)]
    pub area_break: Option<String>,
    #[serde(default)]
    pub area_filter: Option<AreaFilter>,
    #[serde(default)]
    pub universe_filter: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl MedianQuery {
    pub fn new(variable: impl Into<String>) -> Self {
        MedianQuery {
            variable: variable.into(),
            by_var1: None,
            by_var2: None,
            include_full_names: false,
            area_break: None,
            area_filter: None,
            universe_filter: None,
            title: None,
        }
    }
}

/// Any query request, tagged by its kind.
///
/// Reserved kinds carry no parameters; building them yields
/// [`QueryError::Reserved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryRequest {
    AreaList(AreaListQuery),
    Counter(CounterQuery),
    Median(MedianQuery),
    Mean,
    Cross,
    Frequencies,
    Stats,
}

impl QueryRequest {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryRequest::AreaList(_) => QueryKind::AreaList,
            QueryRequest::Counter(_) => QueryKind::Counter,
            QueryRequest::Median(_) => QueryKind::Median,
            QueryRequest::Mean => QueryKind::Mean,
            QueryRequest::Cross => QueryKind::Cross,
            QueryRequest::Frequencies => QueryKind::Frequencies,
            QueryRequest::Stats => QueryKind::Stats,
        }
    }
}

// ──────────────────────────────────────────────
// Builders
// ──────────────────────────────────────────────

/// Build an AREALIST query.
///
/// ```
/// use redatam_core::query::{build_area_list, AreaFilter, AreaListQuery};
///
/// let query = AreaListQuery {
///     area_filter: Some(AreaFilter::new("PROV", vec!["02", "03"]).unwrap()),
///     ..AreaListQuery::new("FRAC", "PERSONA.CONDACT")
/// };
/// assert_eq!(
///     build_area_list(&query).unwrap(),
///     "RUNDEF Job\n    SELECTION INLINE,\n     PROV 02, 03\n\n\
///      TABLE TABLE1\n    AS AREALIST\n    OF FRAC, PERSONA.CONDACT"
/// );
/// ```
pub fn build_area_list(query: &AreaListQuery) -> Result<String, QueryError> {
    let area_level = required_area_level(&query.area_level)?;
    if query.variables.is_empty() {
        return Err(QueryError::EmptyVariables);
    }

    let mut table = Table::new(
        TableKind::AreaList,
        grouped_of(
            area_level,
            query.variables.as_slice(),
            query.include_area_name,
        ),
    );
    table.title = present(&query.title);

    let doc = QueryDocument {
        rundef: rundef(&query.area_filter, &query.universe_filter),
        defines: Vec::new(),
        table,
    };
    tracing::debug!(area_level, variables = query.variables.len(), "built AREALIST query");
    Ok(doc.render())
}

/// Build a counter query: defines `<area_level>.COUNTER` as the count of
/// `counted_entity` and lists it per area.
pub fn build_counter(query: &CounterQuery) -> Result<String, QueryError> {
    let area_level = required_area_level(&query.area_level)?;
    if query.counted_entity.trim().is_empty() {
        return Err(QueryError::EmptyCountedEntity);
    }
    let counter = format!("{}.COUNTER", area_level);

    let mut table = Table::new(
        TableKind::AreaList,
        grouped_of(
            area_level,
            std::slice::from_ref(&counter),
            query.include_area_name,
        ),
    );
    table.title = present(&query.title);
    table.total = query.include_total;

    let doc = QueryDocument {
        rundef: rundef(&query.area_filter, &query.universe_filter),
        defines: vec![Define::count(counter.as_str(), &query.counted_entity)],
        table,
    };
    tracing::debug!(area_level, counted = %query.counted_entity, "built counter query");
    Ok(doc.render())
}

/// Build a MEDIAN query of `variable`, broken down by up to two variables.
pub fn build_median(query: &MedianQuery) -> Result<String, QueryError> {
    if query.variable.trim().is_empty() {
        return Err(QueryError::EmptyVariables);
    }

    let mut table = Table::new(TableKind::Median, OfClause::Single(query.variable.clone()));
    table.title = present(&query.title);
    table.breakdowns = [&query.by_var1, &query.by_var2]
        .into_iter()
        .filter_map(present)
        .collect();
    table.complete_names = query.include_full_names;
    table.area_break = present(&query.area_break);

    let doc = QueryDocument {
        rundef: rundef(&query.area_filter, &query.universe_filter),
        defines: Vec::new(),
        table,
    };
    tracing::debug!(variable = %query.variable, "built MEDIAN query");
    Ok(doc.render())
}

/// Mean queries are reserved.
pub fn build_mean() -> Result<String, QueryError> {
    Err(QueryError::Reserved(QueryKind::Mean))
}

/// Cross-tabulation queries are reserved.
pub fn build_cross() -> Result<String, QueryError> {
    Err(QueryError::Reserved(QueryKind::Cross))
}

/// Frequency queries are reserved.
pub fn build_frequencies() -> Result<String, QueryError> {
    Err(QueryError::Reserved(QueryKind::Frequencies))
}

/// Generic statistics queries are reserved.
pub fn build_stats() -> Result<String, QueryError> {
    Err(QueryError::Reserved(QueryKind::Stats))
}

/// Dispatch a tagged request to its builder.
pub fn build_query(request: &QueryRequest) -> Result<String, QueryError> {
    match request {
        QueryRequest::AreaList(q) => build_area_list(q),
        QueryRequest::Counter(q) => build_counter(q),
        QueryRequest::Median(q) => build_median(q),
        QueryRequest::Mean => build_mean(),
        QueryRequest::Cross => build_cross(),
        QueryRequest::Frequencies => build_frequencies(),
        QueryRequest::Stats => build_stats(),
    }
}

// ──────────────────────────────────────────────
// Shared sub-assembly
// ──────────────────────────────────────────────

fn required_area_level(area_level: &str) -> Result<&str, QueryError> {
    if area_level.trim().is_empty() {
        Err(QueryError::EmptyAreaLevel)
    } else {
        Ok(area_level)
    }
}

/// Empty strings count as absent.
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn rundef(area_filter: &Option<AreaFilter>, universe: &Option<String>) -> Rundef {
    Rundef {
        area_filter: area_filter.clone(),
        universe: present(universe),
    }
}

fn grouped_of(area_level: &str, variables: &[String], include_area_name: bool) -> OfClause {
    let mut listed = Vec::with_capacity(variables.len() + 1);
    if include_area_name {
        listed.push(format!("{}.NOM{}", area_level, area_level));
    }
    listed.extend(variables.iter().cloned());
    OfClause::Grouped {
        area_level: area_level.to_string(),
        variables: listed,
    }
}
