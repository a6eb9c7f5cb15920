use serde::{Deserialize, Serialize};

use crate::models;

/// A cluster of articles covering the same event.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "initializedAt", skip_serializing_if = "Option::is_none")]
    pub initialized_at: Option<String>,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "summary", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "summaryReferences", skip_serializing_if = "Option::is_none")]
    pub summary_references: Option<Vec<String>>,
    #[serde(rename = "keyPoints", skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(rename = "uniqueCount", skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<i64>,
    #[serde(rename = "reprintCount", skip_serializing_if = "Option::is_none")]
    pub reprint_count: Option<i64>,
    #[serde(rename = "totalCount", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(rename = "sentiment", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Box<models::SentimentHolder>>,
    #[serde(rename = "companies", skip_serializing_if = "Option::is_none")]
    pub companies: Option<Vec<models::CompanyCount>>,
    #[serde(rename = "people", skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<models::PersonCount>>,
}

impl Story {
    pub fn new() -> Story {
        Story::default()
    }
}
