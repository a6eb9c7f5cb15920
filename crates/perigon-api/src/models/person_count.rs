use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonCount {
    #[serde(rename = "wikidataId", skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "count", skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl PersonCount {
    pub fn new() -> PersonCount {
        PersonCount {
            wikidata_id: None,
            name: None,
            count: None,
        }
    }
}
