use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    /// Similarity to the search prompt.
    #[serde(rename = "score")]
    pub score: f64,
    #[serde(rename = "data")]
    pub data: Box<models::Article>,
}

impl ScoredArticle {
    pub fn new(score: f64, data: models::Article) -> ScoredArticle {
        ScoredArticle {
            score,
            data: Box::new(data),
        }
    }
}
