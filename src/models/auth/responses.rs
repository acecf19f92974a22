use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub refresh: String,
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}
