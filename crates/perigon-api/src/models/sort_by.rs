use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort order for story, company and journalist searches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "updatedAt")]
    UpdatedAt,
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "totalCount")]
    TotalCount,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CreatedAt => write!(f, "createdAt"),
            Self::UpdatedAt => write!(f, "updatedAt"),
            Self::Count => write!(f, "count"),
            Self::TotalCount => write!(f, "totalCount"),
        }
    }
}
