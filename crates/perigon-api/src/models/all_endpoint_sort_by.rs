use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort order for the article search endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum AllEndpointSortBy {
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "reverseDate")]
    ReverseDate,
    #[serde(rename = "reverseAddDate")]
    ReverseAddDate,
    #[serde(rename = "addDate")]
    AddDate,
    #[serde(rename = "pubDate")]
    PubDate,
    #[serde(rename = "refreshDate")]
    RefreshDate,
}

impl fmt::Display for AllEndpointSortBy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Relevance => write!(f, "relevance"),
            Self::Date => write!(f, "date"),
            Self::ReverseDate => write!(f, "reverseDate"),
            Self::ReverseAddDate => write!(f, "reverseAddDate"),
            Self::AddDate => write!(f, "addDate"),
            Self::PubDate => write!(f, "pubDate"),
            Self::RefreshDate => write!(f, "refreshDate"),
        }
    }
}
