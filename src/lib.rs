//! Servease Match - matching and ranking service for the Servease marketplace
//!
//! This library provides the core matching engine used by the Servease
//! marketplace: it ranks provider profiles against a service post (and open
//! posts against a provider) using deterministic keyword-overlap scoring,
//! optionally reordered by an external text-ranking service with graceful
//! fallback when that service is unavailable.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{lexical_score, MatchResult, Matcher};
pub use crate::models::{
    MatchPostsRequest, MatchProvidersRequest, MatchResponse, PostStatus, ProviderProfile,
    ScoredMatch, ServicePost,
};
pub use crate::services::{RankOutcome, RankerClient};
