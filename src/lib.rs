//! StreetMatch - phonetic street-name resolution
//!
//! Resolves a caller's spoken (or spelled) street name against the short list
//! of streets a restaurant delivers to, tolerating mis-hearings and spelling
//! variants ("Gulf" for "Golf", "Lynn" for "Lane").
//!
//! # Features
//! - Street-name normalization (suffixes, directionals, diacritics)
//! - Double Metaphone phonetic codes with a primary and alternate encoding
//! - Myers bit-parallel Levenshtein similarity
//! - Suffix-aware ranking with parallel scoring for large pools
//! - Letter-by-letter and phonetic-alphabet spelling decoder
//! - Thread-safe TTL cache of street lists
//! - A closed outcome protocol for voice assistants
//!
//! # Example
//! ```
//! use streetmatch::{InMemoryStreetSource, LookupRequest, Outcome, StreetRecord, StreetResolver};
//!
//! let source: InMemoryStreetSource = ["Golf Road", "Oak Street"]
//!     .into_iter()
//!     .map(|name| StreetRecord::new("rest-001", "60008", name))
//!     .collect();
//! let resolver = StreetResolver::new(source);
//!
//! let outcome = resolver.resolve(&LookupRequest::new("rest-001", "60008", "Gulf Road"));
//! assert!(matches!(outcome, Outcome::Found { ref street_name, .. } if street_name == "Golf Road"));
//! ```

pub mod adapter;
pub mod algorithms;
pub mod cache;
pub mod config;
pub mod error;
pub mod matching;
pub mod outcome;
pub mod records;
pub mod resolver;

// ============================================================================
// Re-exports
// ============================================================================

pub use algorithms::normalize::{core_name, dominant_suffix, expand_for_speech, normalize};
pub use algorithms::phonetic::{encode, PhoneticCodes};
pub use algorithms::spelled::decode as decode_spelled;
pub use algorithms::EditDistance;
pub use cache::{CacheStats, CandidateCache};
pub use config::ResolverConfig;
pub use error::{AdapterError, ConfigError, FetchError, ResolveError};
pub use matching::{MatchClass, MatchRanker, SimilarityScorer};
pub use outcome::{CandidateScore, Outcome, SuggestAction};
pub use records::{prepare_street_records, LookupRequest, ScoredCandidate, StreetRecord};
pub use resolver::{InMemoryStreetSource, StreetResolver, StreetSource};

// ============================================================================
// Convenience functions
// ============================================================================

/// Similarity score in `[0, 100]` between heard text and a street name.
///
/// # Example
/// ```
/// assert_eq!(streetmatch::similarity("Gulf Road", "Golf Road"), 80);
/// ```
#[must_use]
pub fn similarity(heard: &str, street_name: &str) -> u32 {
    matching::score(heard, street_name, None)
}
