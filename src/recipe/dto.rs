use serde::Deserialize;

/// Body for creating a tag or an ingredient.
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(default)]
    pub name: String,
}
