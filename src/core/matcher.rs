use crate::core::scoring::lexical_score;
use crate::models::{ProviderProfile, ScoredMatch, ServicePost};
use crate::services::{MatchSubject, RankCandidate, RankOutcome, RankerClient};
use std::sync::Arc;

/// Result of one match computation
#[derive(Debug)]
pub struct MatchResult<T> {
    pub matches: Vec<ScoredMatch<T>>,
    pub total_candidates: usize,
}

/// Match aggregator - produces an ordered, scored shortlist for one subject
/// against one candidate pool.
///
/// # Pipeline
/// 1. If an external ranker is configured, ask it for an ordering covering
///    the full pool (ranked entries first, lexical entries for the rest)
/// 2. If it is not configured or returned nothing usable, score every
///    candidate lexically
/// 3. Stable sort by score descending, truncate to the limit
///
/// The same aggregator serves both directions: providers ranked against one
/// post, and open posts ranked against one provider. Eligibility filtering
/// (provider has an account, post is open) is the caller's responsibility;
/// the pool handed in is assumed already filtered.
#[derive(Clone, Default)]
pub struct Matcher {
    ranker: Option<Arc<RankerClient>>,
}

impl Matcher {
    pub fn new(ranker: Option<Arc<RankerClient>>) -> Self {
        Self { ranker }
    }

    /// A matcher with no external ranker; every candidate is scored lexically.
    pub fn lexical_only() -> Self {
        Self { ranker: None }
    }

    pub fn has_ranker(&self) -> bool {
        self.ranker.is_some()
    }

    /// Rank provider profiles against one service post.
    pub async fn match_providers(
        &self,
        post: &ServicePost,
        providers: Vec<ProviderProfile>,
        limit: usize,
    ) -> MatchResult<ProviderProfile> {
        self.rank_pool(MatchSubject::Post(post), providers, |p| lexical_score(post, p), limit)
            .await
    }

    /// Rank open service posts against one provider profile.
    pub async fn match_posts(
        &self,
        provider: &ProviderProfile,
        posts: Vec<ServicePost>,
        limit: usize,
    ) -> MatchResult<ServicePost> {
        self.rank_pool(
            MatchSubject::Provider(provider),
            posts,
            |post| lexical_score(post, provider),
            limit,
        )
        .await
    }

    async fn rank_pool<T, F>(
        &self,
        subject: MatchSubject<'_>,
        pool: Vec<T>,
        lexical: F,
        limit: usize,
    ) -> MatchResult<T>
    where
        T: RankCandidate + Clone,
        F: Fn(&T) -> i64,
    {
        let total_candidates = pool.len();
        if pool.is_empty() {
            return MatchResult {
                matches: Vec::new(),
                total_candidates,
            };
        }

        let mut scored = match &self.ranker {
            Some(ranker) => match ranker.rank(&subject, &pool, &lexical).await {
                RankOutcome::Ranked(scored) => scored,
                RankOutcome::Unavailable => score_lexically(pool, &lexical),
            },
            None => score_lexically(pool, &lexical),
        };

        // Stable sort: candidates with equal scores keep the order they had
        // after scoring, which is pool order on the lexical path
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }
}

fn score_lexically<T, F>(pool: Vec<T>, lexical: &F) -> Vec<ScoredMatch<T>>
where
    F: Fn(&T) -> i64,
{
    pool.into_iter()
        .map(|candidate| ScoredMatch {
            score: lexical(&candidate),
            candidate,
        })
        .collect()
}
