//! Caller-facing parameter shapes shared by the query builders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// One area code or several. `"02"` and `["02"]` render identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AreaCodes {
    One(String),
    Many(Vec<String>),
}

impl AreaCodes {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            AreaCodes::One(code) => vec![code],
            AreaCodes::Many(codes) => codes,
        }
    }
}

impl From<&str> for AreaCodes {
    fn from(code: &str) -> Self {
        AreaCodes::One(code.to_string())
    }
}

impl From<String> for AreaCodes {
    fn from(code: String) -> Self {
        AreaCodes::One(code)
    }
}

impl From<Vec<String>> for AreaCodes {
    fn from(codes: Vec<String>) -> Self {
        AreaCodes::Many(codes)
    }
}

impl From<Vec<&str>> for AreaCodes {
    fn from(codes: Vec<&str>) -> Self {
        AreaCodes::Many(codes.into_iter().map(str::to_owned).collect())
    }
}

/// Restriction of a query to specific areas of one area type
/// (e.g. provinces `02` and `03`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, AreaCodes>", into = "BTreeMap<String, AreaCodes>")]
pub struct AreaFilter {
    area_type: String,
    codes: Vec<String>,
}

impl AreaFilter {
    pub fn new(
        area_type: impl Into<String>,
        codes: impl Into<AreaCodes>,
    ) -> Result<Self, QueryError> {
        let area_type = area_type.into();
        let codes = codes.into().into_vec();
        if codes.is_empty() {
            return Err(QueryError::EmptyAreaCodes { area_type });
        }
        Ok(AreaFilter { area_type, codes })
    }

    /// Build a filter from the mapping form `{area_type: codes}`.
    ///
    /// The mapping must hold exactly one key.
    pub fn from_map(map: BTreeMap<String, AreaCodes>) -> Result<Self, QueryError> {
        if map.len() != 1 {
            return Err(QueryError::AreaFilterShape { keys: map.len() });
        }
        let mut entries = map.into_iter();
        match entries.next() {
            Some((area_type, codes)) => AreaFilter::new(area_type, codes),
            None => Err(QueryError::AreaFilterShape { keys: 0 }),
        }
    }

    pub fn area_type(&self) -> &str {
        &self.area_type
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl TryFrom<BTreeMap<String, AreaCodes>> for AreaFilter {
    type Error = QueryError;

    fn try_from(map: BTreeMap<String, AreaCodes>) -> Result<Self, Self::Error> {
        AreaFilter::from_map(map)
    }
}

impl From<AreaFilter> for BTreeMap<String, AreaCodes> {
    fn from(filter: AreaFilter) -> Self {
        BTreeMap::from([(filter.area_type, AreaCodes::Many(filter.codes))])
    }
}

/// Ordered list of `ENTITY.VARIABLE` identifiers.
///
/// Order is kept exactly as given; callers control grouping order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AreaCodes", into = "Vec<String>")]
pub struct VariableList(Vec<String>);

impl VariableList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// Variables share the one-or-many wire shape with area codes.
impl From<AreaCodes> for VariableList {
    fn from(codes: AreaCodes) -> Self {
        VariableList(codes.into_vec())
    }
}

impl From<VariableList> for Vec<String> {
    fn from(list: VariableList) -> Self {
        list.0
    }
}

impl From<&str> for VariableList {
    fn from(variable: &str) -> Self {
        VariableList(vec![variable.to_string()])
    }
}

impl From<String> for VariableList {
    fn from(variable: String) -> Self {
        VariableList(vec![variable])
    }
}

impl From<Vec<String>> for VariableList {
    fn from(variables: Vec<String>) -> Self {
        VariableList(variables)
    }
}

impl From<Vec<&str>> for VariableList {
    fn from(variables: Vec<&str>) -> Self {
        VariableList(variables.into_iter().map(str::to_owned).collect())
    }
}
