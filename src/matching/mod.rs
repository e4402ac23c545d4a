//! Scoring and ranking of candidate streets against a heard name

pub mod ranker;
pub mod scoring;

pub use ranker::{MatchClass, MatchRanker, RankedMatches};
pub use scoring::{phonetic_points, score, HeardName, SimilarityScorer, MAX_SCORE};
