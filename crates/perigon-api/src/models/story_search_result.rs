use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorySearchResult {
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(rename = "numResults")]
    pub num_results: i64,
    #[serde(rename = "results")]
    pub results: Vec<models::Story>,
}

impl StorySearchResult {
    pub fn new(num_results: i64, results: Vec<models::Story>) -> StorySearchResult {
        StorySearchResult {
            status: None,
            num_results,
            results,
        }
    }
}
