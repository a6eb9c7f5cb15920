use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalistSearchResult {
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(rename = "numResults")]
    pub num_results: i64,
    #[serde(rename = "results")]
    pub results: Vec<models::Journalist>,
}

impl JournalistSearchResult {
    pub fn new(num_results: i64, results: Vec<models::Journalist>) -> JournalistSearchResult {
        JournalistSearchResult {
            status: None,
            num_results,
            results,
        }
    }
}
