use crate::models::{ProviderProfile, ScoredMatch, ServicePost};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Bound on the outbound call so a slow ranker cannot stall the match request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_MODEL: &str = "rank-text-v1";
const MAX_TOKENS: u32 = 256;

/// Errors that can occur when talking to the external ranking service.
///
/// None of these escape the adapter: `rank` converts every failure into
/// `RankOutcome::Unavailable` so the caller can fall back to lexical scoring.
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Result of asking the external service for an ordering.
#[derive(Debug)]
pub enum RankOutcome<T> {
    /// A scored list covering the entire input pool: externally ranked
    /// entries first, lexical-fallback entries for the rest.
    Ranked(Vec<ScoredMatch<T>>),
    /// The service was unreachable, timed out, or returned nothing usable.
    Unavailable,
}

/// A candidate the external ranker can order: it needs a numeric id to hand
/// back, a one-line description for the prompt, and whether the candidate
/// earns the verified boost on its synthetic score.
pub trait RankCandidate {
    fn rank_id(&self) -> i64;
    fn verified_boost(&self) -> bool;
    fn describe(&self) -> String;
}

impl RankCandidate for ProviderProfile {
    fn rank_id(&self) -> i64 {
        self.id
    }

    fn verified_boost(&self) -> bool {
        self.verified()
    }

    fn describe(&self) -> String {
        let mut parts = vec![format!("id {}: {}", self.id, self.name)];
        if let Some(title) = &self.title {
            parts.push(format!("title: {}", title));
        }
        if let Some(description) = &self.description {
            parts.push(format!("about: {}", description));
        }
        if !self.skills.is_empty() {
            parts.push(format!("skills: {}", self.skills.join(", ")));
        }
        if let Some(location) = &self.location {
            parts.push(format!("location: {}", location));
        }
        if self.verified() {
            parts.push("verified".to_string());
        }
        if let Some(rating) = self.rating {
            parts.push(format!("rating: {:.1}", rating));
        }
        parts.join("; ")
    }
}

impl RankCandidate for ServicePost {
    fn rank_id(&self) -> i64 {
        self.id
    }

    // Posts carry no verification flag
    fn verified_boost(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        let mut parts = vec![format!("id {}: {}", self.id, self.title)];
        if let Some(description) = &self.description {
            parts.push(format!("details: {}", description));
        }
        if let Some(location) = &self.location {
            parts.push(format!("location: {}", location));
        }
        match (self.budget_min, self.budget_max) {
            (Some(lo), Some(hi)) => parts.push(format!("budget: {}-{}", lo, hi)),
            (Some(lo), None) => parts.push(format!("budget from {}", lo)),
            (None, Some(hi)) => parts.push(format!("budget up to {}", hi)),
            (None, None) => {}
        }
        parts.join("; ")
    }
}

/// The entity a pool is being ranked against. The two directions only
/// differ in which attributes end up in the prompt.
#[derive(Debug, Clone, Copy)]
pub enum MatchSubject<'a> {
    Post(&'a ServicePost),
    Provider(&'a ProviderProfile),
}

impl MatchSubject<'_> {
    fn describe(&self) -> String {
        match self {
            MatchSubject::Post(post) => {
                format!("Service request to fill:\n{}", post.describe())
            }
            MatchSubject::Provider(provider) => {
                format!("Provider looking for suitable work:\n{}", provider.describe())
            }
        }
    }
}

/// Client for the external text-ranking service.
///
/// One blocking-equivalent outbound call per match request, bounded by
/// `REQUEST_TIMEOUT`, no retries. The response is untrusted free text and
/// is parsed permissively; anything unusable turns into `Unavailable`.
pub struct RankerClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl RankerClient {
    /// Create a new ranker client
    pub fn new(endpoint: String, api_key: String, model: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        }
    }

    /// Ask the external service to order `pool` by relevance to `subject`.
    ///
    /// On success the returned list covers the whole pool: candidates the
    /// service mentioned get synthetic scores preserving its order (first
    /// ranked = pool size + 10, each next one lower, +5 if verified), and
    /// candidates it omitted get their lexical score. Any failure, including
    /// a response with no usable ids, yields `Unavailable`.
    pub async fn rank<T, F>(
        &self,
        subject: &MatchSubject<'_>,
        pool: &[T],
        lexical: F,
    ) -> RankOutcome<T>
    where
        T: RankCandidate + Clone,
        F: Fn(&T) -> i64,
    {
        if pool.is_empty() {
            return RankOutcome::Unavailable;
        }

        let prompt = build_prompt(subject, pool);

        let text = match self.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("External ranker unavailable, falling back to lexical scoring: {}", e);
                return RankOutcome::Unavailable;
            }
        };

        match merge_ranking(&text, pool, lexical) {
            Some(matches) => {
                tracing::debug!("External ranker ordered {} of {} candidates", matches.len(), pool.len());
                RankOutcome::Ranked(matches)
            }
            None => {
                tracing::warn!("External ranker response contained no usable candidate ids");
                RankOutcome::Unavailable
            }
        }
    }

    /// Send one completion request and extract the response text.
    async fn complete(&self, prompt: &str) -> Result<String, RankerError> {
        let url = format!("{}/v1/complete", self.endpoint.trim_end_matches('/'));

        let payload = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "max_tokens": MAX_TOKENS,
        });

        tracing::debug!("Requesting ranking from: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RankerError::ApiError(format!(
                "Ranking request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("text")
            .and_then(|t| t.as_str())
            .map(str::to_owned)
            .ok_or_else(|| RankerError::InvalidResponse("Missing text field".into()))
    }
}

/// Build the natural-language ranking prompt for one subject and pool.
fn build_prompt<T: RankCandidate>(subject: &MatchSubject<'_>, pool: &[T]) -> String {
    let mut prompt = String::from("You are matching candidates on a services marketplace.\n\n");
    prompt.push_str(&subject.describe());
    prompt.push_str("\n\nCandidates:\n");
    for candidate in pool {
        prompt.push_str("- ");
        prompt.push_str(&candidate.describe());
        prompt.push('\n');
    }
    prompt.push_str(
        "\nRate each candidate's relevance to the subject on a scale of 1 to 100. \
         Respond with only a comma-separated list of candidate ids, best match first.",
    );
    prompt
}

/// Extract candidate ids from the service's free-text reply.
///
/// The reply is untrusted: split on commas, keep the tokens that parse as
/// integers, ignore everything else (prose, blank entries, stray symbols).
pub fn parse_ranked_ids(text: &str) -> Vec<i64> {
    text.split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}

/// Merge the service's id ordering with the pool into a full scored list.
///
/// Unknown ids are dropped, duplicates keep their first position, and pool
/// candidates the service never mentioned are appended with their lexical
/// score in pool order. Returns None when no id maps back to the pool.
fn merge_ranking<T, F>(response: &str, pool: &[T], lexical: F) -> Option<Vec<ScoredMatch<T>>>
where
    T: RankCandidate + Clone,
    F: Fn(&T) -> i64,
{
    let ranked_ids = parse_ranked_ids(response);
    if ranked_ids.is_empty() {
        return None;
    }

    let mut taken: HashSet<usize> = HashSet::new();
    let mut matches: Vec<ScoredMatch<T>> = Vec::with_capacity(pool.len());

    // Synthetic scores start above anything lexical scoring can assign for
    // this pool and step down by one per ranked candidate.
    let mut synthetic = pool.len() as i64 + 10;

    for id in ranked_ids {
        let Some(idx) = pool.iter().position(|c| c.rank_id() == id) else {
            continue;
        };
        if !taken.insert(idx) {
            continue;
        }

        let mut score = synthetic;
        if pool[idx].verified_boost() {
            score += 5;
        }
        matches.push(ScoredMatch {
            score,
            candidate: pool[idx].clone(),
        });
        synthetic -= 1;
    }

    // Every parsed id was stale or unknown
    if matches.is_empty() {
        return None;
    }

    for (idx, candidate) in pool.iter().enumerate() {
        if !taken.contains(&idx) {
            matches.push(ScoredMatch {
                score: lexical(candidate),
                candidate: candidate.clone(),
            });
        }
    }

    Some(matches)
}
