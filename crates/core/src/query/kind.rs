//! The set of REDATAM query kinds this crate knows about.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A REDATAM query kind.
///
/// Supported kinds have a builder. Reserved kinds are recognized names whose
/// builders return [`QueryError::Reserved`](crate::QueryError::Reserved);
/// adding a kind means moving it from the reserved group to the supported
/// group and giving it a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    AreaList,
    Counter,
    Median,
    Mean,
    Cross,
    Frequencies,
    Stats,
}

impl QueryKind {
    pub const ALL: [QueryKind; 7] = [
        QueryKind::AreaList,
        QueryKind::Counter,
        QueryKind::Median,
        QueryKind::Mean,
        QueryKind::Cross,
        QueryKind::Frequencies,
        QueryKind::Stats,
    ];

    pub fn is_supported(self) -> bool {
        matches!(
            self,
            QueryKind::AreaList | QueryKind::Counter | QueryKind::Median
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            QueryKind::AreaList => "arealist",
            QueryKind::Counter => "counter",
            QueryKind::Median => "median",
            QueryKind::Mean => "mean",
            QueryKind::Cross => "cross",
            QueryKind::Frequencies => "frequencies",
            QueryKind::Stats => "stats",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`QueryKind::from_str`] for names outside [`QueryKind::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQueryKind(pub String);

impl fmt::Display for UnknownQueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = QueryKind::ALL.iter().map(|k| k.name()).collect();
        write!(
            f,
            "unknown query kind '{}'. Valid: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownQueryKind {}

impl FromStr for QueryKind {
    type Err = UnknownQueryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        QueryKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| UnknownQueryKind(s.to_string()))
    }
}
