use serde::{Deserialize, Serialize};

use crate::models;

/// A page of article search results.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuerySearchResult {
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Total number of matches, not the size of this page.
    #[serde(rename = "numResults")]
    pub num_results: i64,
    #[serde(rename = "articles")]
    pub articles: Vec<models::Article>,
}

impl QuerySearchResult {
    pub fn new(num_results: i64, articles: Vec<models::Article>) -> QuerySearchResult {
        QuerySearchResult {
            status: None,
            num_results,
            articles,
        }
    }
}
