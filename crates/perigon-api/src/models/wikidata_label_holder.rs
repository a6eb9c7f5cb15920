use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct WikidataLabelHolder {
    #[serde(rename = "wikidataId", skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    #[serde(rename = "label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl WikidataLabelHolder {
    pub fn new() -> WikidataLabelHolder {
        WikidataLabelHolder {
            wikidata_id: None,
            label: None,
        }
    }
}
