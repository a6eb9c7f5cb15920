use serde::{Deserialize, Serialize};

use crate::models;

/// A single news article.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "articleId", skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    #[serde(rename = "clusterId", skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "summary", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "authorsByline", skip_serializing_if = "Option::is_none")]
    pub authors_byline: Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "pubDate", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(rename = "addDate", skip_serializing_if = "Option::is_none")]
    pub add_date: Option<String>,
    #[serde(rename = "refreshDate", skip_serializing_if = "Option::is_none")]
    pub refresh_date: Option<String>,
    #[serde(rename = "score", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(rename = "reprint", skip_serializing_if = "Option::is_none")]
    pub reprint: Option<bool>,
    #[serde(rename = "source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Box<models::ArticleSource>>,
    #[serde(rename = "sentiment", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Box<models::SentimentHolder>>,
    #[serde(rename = "companies", skip_serializing_if = "Option::is_none")]
    pub companies: Option<Vec<models::CompanyCount>>,
    #[serde(rename = "people", skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<models::PersonCount>>,
    /// Wikidata entities linked to the article.
    #[serde(rename = "entities", skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<models::WikidataLabelHolder>>,
}

impl Article {
    pub fn new() -> Article {
        Article::default()
    }
}
