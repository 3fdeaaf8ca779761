use serde::{Deserialize, Serialize};

use crate::models::domain::ScoredMatch;

/// Response for both match endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse<T> {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub matches: Vec<ScoredMatch<T>>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
