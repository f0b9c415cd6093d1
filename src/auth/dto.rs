use serde::{Deserialize, Serialize};

/// Request body for token issuance. Missing fields deserialize as blank and
/// are rejected by the service.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
