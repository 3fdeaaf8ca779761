use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle status of a service post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Open,
    Closed,
}

/// A service request posted by a finder
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServicePost {
    pub id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "budgetMin", default)]
    pub budget_min: Option<i64>,
    #[serde(rename = "budgetMax", default)]
    pub budget_max: Option<i64>,
    #[serde(default)]
    pub status: PostStatus,
}

impl ServicePost {
    pub fn is_open(&self) -> bool {
        self.status == PostStatus::Open
    }

    /// Lowercase search text built from title and description.
    /// A missing description contributes an empty string, never an error.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description.as_deref().unwrap_or("")).to_lowercase()
    }
}

/// A provider profile advertising skills
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderProfile {
    pub id: i64,
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl ProviderProfile {
    /// Helper to get is_verified as a bool, defaulting to false
    pub fn verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
    }

    /// Providers with no linked account are not eligible for matching
    pub fn has_account(&self) -> bool {
        self.account_id.is_some()
    }
}

/// A scored candidate produced by one match computation.
/// Never persisted; the candidate always comes from the input pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch<T> {
    pub score: i64,
    pub candidate: T,
}
