use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchResult {
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(rename = "results")]
    pub results: Vec<models::ScoredArticle>,
}

impl VectorSearchResult {
    pub fn new(results: Vec<models::ScoredArticle>) -> VectorSearchResult {
        VectorSearchResult {
            status: None,
            results,
        }
    }
}
