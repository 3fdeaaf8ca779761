// Service exports
pub mod ranker;

pub use ranker::{parse_ranked_ids, MatchSubject, RankCandidate, RankOutcome, RankerClient, RankerError};
