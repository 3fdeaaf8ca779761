use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{ProviderProfile, ServicePost};

/// Request to rank providers against one service post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchProvidersRequest {
    #[validate(nested)]
    pub post: ServicePost,
    #[serde(default)]
    pub providers: Vec<ProviderProfile>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to rank open posts against one provider profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchPostsRequest {
    #[validate(nested)]
    pub provider: ProviderProfile,
    #[serde(default)]
    pub posts: Vec<ServicePost>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<usize>,
}
