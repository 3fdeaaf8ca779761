use crate::models::{ProviderProfile, ServicePost};

/// Compute the keyword-overlap score for one (post, provider) pair.
///
/// Scoring rules:
/// - each skill that appears verbatim (contiguous substring) in the post's
///   title + description text: +2
/// - otherwise, +1 for *every* whitespace token of the skill found in the
///   text. Tokens are not deduplicated, so a multi-word skill whose tokens
///   all match can outscore a verbatim single-word match. That asymmetry is
///   intentional and relied on by callers; do not "fix" it here.
/// - + the provider's rating, truncated to an integer (missing rating = 0)
/// - +2 if the provider is verified
///
/// The result is always >= 0. Both match directions use the same pairing:
/// the text comes from the post, the skills come from the provider.
pub fn lexical_score(post: &ServicePost, provider: &ProviderProfile) -> i64 {
    let haystack = post.haystack();

    let mut score: i64 = 0;
    for skill in &provider.skills {
        let skill = skill.to_lowercase();
        if haystack.contains(skill.as_str()) {
            score += 2;
        } else {
            for token in skill.split_whitespace() {
                if haystack.contains(token) {
                    score += 1;
                }
            }
        }
    }

    score += provider.rating.unwrap_or(0.0).max(0.0) as i64;

    if provider.verified() {
        score += 2;
    }

    score
}
