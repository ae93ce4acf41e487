use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kana: Option<String>, // reading used for sort order
    #[serde(default = "official_by_default")]
    pub is_official: bool,
}

fn official_by_default() -> bool {
    true
}
