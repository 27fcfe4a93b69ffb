use serde::{Deserialize, Serialize};
use crate::models::domain::Match;
use crate::services::CacheStats;

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCatsResponse {
    #[serde(rename = "searchId")]
    pub search_id: String,
    pub matches: Vec<Match>,
    pub total: usize,
    pub message: String,
    #[serde(rename = "needsApiKeys", default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_api_keys: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "shelterDirectory")]
    pub shelter_directory: String,
    #[serde(rename = "breedCache")]
    pub breed_cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
