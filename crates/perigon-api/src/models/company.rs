use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "wikidataId", skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "altNames", skip_serializing_if = "Option::is_none")]
    pub alt_names: Option<Vec<String>>,
    #[serde(rename = "domains", skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "industry", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(rename = "ceo", skip_serializing_if = "Option::is_none")]
    pub ceo: Option<String>,
    #[serde(rename = "country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "employees", skip_serializing_if = "Option::is_none")]
    pub employees: Option<i64>,
    #[serde(rename = "yearFounded", skip_serializing_if = "Option::is_none")]
    pub year_founded: Option<i32>,
}

impl Company {
    pub fn new() -> Company {
        Company::default()
    }
}
