// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{PostStatus, ProviderProfile, ScoredMatch, ServicePost};
pub use requests::{MatchPostsRequest, MatchProvidersRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchResponse};
