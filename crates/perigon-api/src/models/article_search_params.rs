use serde::{Deserialize, Serialize};

/// Body of a semantic article search.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticleSearchParams {
    /// Natural language description of the articles to find.
    #[serde(rename = "prompt")]
    pub prompt: String,
    #[serde(rename = "pubDateFrom", skip_serializing_if = "Option::is_none")]
    pub pub_date_from: Option<String>,
    #[serde(rename = "pubDateTo", skip_serializing_if = "Option::is_none")]
    pub pub_date_to: Option<String>,
    #[serde(rename = "showReprints", skip_serializing_if = "Option::is_none")]
    pub show_reprints: Option<bool>,
    #[serde(rename = "page", skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(rename = "size", skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

impl ArticleSearchParams {
    pub fn new(prompt: String) -> ArticleSearchParams {
        ArticleSearchParams {
            prompt,
            ..Default::default()
        }
    }
}
