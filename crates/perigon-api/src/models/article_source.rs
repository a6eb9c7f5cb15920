use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(rename = "domain", skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "paywall", skip_serializing_if = "Option::is_none")]
    pub paywall: Option<bool>,
    #[serde(rename = "location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ArticleSource {
    pub fn new() -> ArticleSource {
        ArticleSource {
            domain: None,
            paywall: None,
            location: None,
        }
    }
}
