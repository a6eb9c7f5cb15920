use serde::{Deserialize, Serialize};

/// Positive, negative and neutral sentiment scores, each between 0 and 1.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentHolder {
    #[serde(rename = "positive", skip_serializing_if = "Option::is_none")]
    pub positive: Option<f64>,
    #[serde(rename = "negative", skip_serializing_if = "Option::is_none")]
    pub negative: Option<f64>,
    #[serde(rename = "neutral", skip_serializing_if = "Option::is_none")]
    pub neutral: Option<f64>,
}

impl SentimentHolder {
    pub fn new() -> SentimentHolder {
        SentimentHolder {
            positive: None,
            negative: None,
            neutral: None,
        }
    }
}
