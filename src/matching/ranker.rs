//! Candidate ranking and outcome classification
//!
//! Given a heard street name and every street known for a restaurant/ZIP:
//! 1. restrict to streets sharing the caller's stated suffix (when that leaves any)
//! 2. score, drop anything at or below the relevance threshold, sort, keep the top N
//! 3. classify the result into a [`MatchClass`]

use rayon::prelude::*;

use super::scoring::{HeardName, SimilarityScorer};
use crate::algorithms::normalize::dominant_suffix;
use crate::algorithms::EditDistance;
use crate::config::ResolverConfig;
use crate::records::{ScoredCandidate, StreetRecord};

/// Minimum pool size for parallel scoring.
///
/// Per-restaurant ZIP lists are usually a few dozen streets, where sequential
/// scoring beats the thread-pool handoff.
const PARALLEL_THRESHOLD: usize = 100;

/// Scored and truncated candidates for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMatches {
    /// Best candidates, highest score first, at most `max_candidates`.
    pub top: Vec<ScoredCandidate>,
    /// Candidates that cleared the relevance threshold before truncation.
    pub survivors: usize,
    /// Size of the pool that was scored (after suffix pre-filtering).
    pub pool_size: usize,
    /// Suffix used to restrict the pool, if any.
    pub suffix_filter: Option<&'static str>,
}

/// Classification of a ranking, before any prompt wording is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchClass {
    /// No streets are known for the restaurant/ZIP at all.
    NoStreets,
    /// Streets exist but none cleared the relevance threshold.
    NoMatch,
    /// Exactly one survivor, at or above the high-confidence threshold.
    Confident(ScoredCandidate),
    /// Up to `max_candidates` plausible streets to choose between.
    Ambiguous(Vec<ScoredCandidate>),
    /// More survivors than can be read back to the caller.
    TooMany { survivors: usize },
}

/// Ranks and classifies candidate streets.
#[derive(Debug, Clone, Default)]
pub struct MatchRanker<D = crate::algorithms::Levenshtein> {
    scorer: SimilarityScorer<D>,
    config: ResolverConfig,
}

impl MatchRanker {
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            scorer: SimilarityScorer::new(),
            config,
        }
    }
}

impl<D: EditDistance> MatchRanker<D> {
    #[must_use]
    pub fn with_scorer(scorer: SimilarityScorer<D>, config: ResolverConfig) -> Self {
        Self { scorer, config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Restrict to candidates sharing `suffix`, unless none do.
    fn suffix_pool<'a>(
        streets: &'a [StreetRecord],
        suffix: Option<&'static str>,
    ) -> (Vec<&'a StreetRecord>, Option<&'static str>) {
        if let Some(suffix) = suffix {
            let restricted: Vec<&StreetRecord> = streets
                .iter()
                .filter(|s| dominant_suffix(&s.street_name) == Some(suffix))
                .collect();
            if !restricted.is_empty() {
                return (restricted, Some(suffix));
            }
        }
        (streets.iter().collect(), None)
    }

    fn score_one(&self, heard: &HeardName, record: &StreetRecord) -> ScoredCandidate {
        let stored = record.stored_codes();
        ScoredCandidate {
            record: record.clone(),
            score: self.scorer.score_heard(heard, &record.street_name, stored.as_ref()),
        }
    }

    /// Score and rank `streets` against the heard text.
    #[must_use]
    pub fn rank(&self, heard_text: &str, streets: &[StreetRecord]) -> RankedMatches {
        let heard = HeardName::new(heard_text);
        let (pool, suffix_filter) = Self::suffix_pool(streets, dominant_suffix(heard_text));
        let min_score = self.config.min_score;

        let mut scored: Vec<ScoredCandidate> = if pool.len() >= PARALLEL_THRESHOLD {
            pool.par_iter()
                .map(|record| self.score_one(&heard, record))
                .filter(|c| c.score > min_score)
                .collect()
        } else {
            pool.iter()
                .map(|record| self.score_one(&heard, record))
                .filter(|c| c.score > min_score)
                .collect()
        };

        // stable: equal scores keep storage order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        let survivors = scored.len();
        scored.truncate(self.config.max_candidates);

        RankedMatches {
            top: scored,
            survivors,
            pool_size: pool.len(),
            suffix_filter,
        }
    }

    /// Classify a ranking. `total_streets` is the size of the unfiltered list.
    #[must_use]
    pub fn classify(&self, total_streets: usize, ranked: RankedMatches) -> MatchClass {
        if total_streets == 0 {
            return MatchClass::NoStreets;
        }
        if ranked.survivors == 0 {
            return MatchClass::NoMatch;
        }
        if ranked.survivors == 1 {
            if let Some(best) = ranked.top.first().filter(|c| c.score >= self.config.high_confidence) {
                return MatchClass::Confident(best.clone());
            }
        }
        if ranked.survivors > self.config.max_candidates {
            return MatchClass::TooMany {
                survivors: ranked.survivors,
            };
        }
        MatchClass::Ambiguous(ranked.top)
    }

    /// Rank and classify in one step.
    #[must_use]
    pub fn resolve(&self, heard_text: &str, streets: &[StreetRecord]) -> MatchClass {
        let ranked = self.rank(heard_text, streets);
        tracing::debug!(
            heard = heard_text,
            pool = ranked.pool_size,
            survivors = ranked.survivors,
            suffix = ranked.suffix_filter.unwrap_or("-"),
            "ranked street candidates"
        );
        self.classify(streets.len(), ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streets(names: &[&str]) -> Vec<StreetRecord> {
        names
            .iter()
            .map(|n| StreetRecord::new("rest-001", "60008", *n))
            .collect()
    }

    fn ranker() -> MatchRanker {
        MatchRanker::new(ResolverConfig::default())
    }

    #[test]
    fn test_suffix_prefilter_breaks_tie() {
        let pool = streets(&["Grouse Lane", "Grouse Court"]);
        let ranked = ranker().rank("Grouse Lane", &pool);
        assert_eq!(ranked.suffix_filter, Some("LN"));
        assert_eq!(ranked.pool_size, 1);

        match ranker().resolve("Grouse Lane", &pool) {
            MatchClass::Confident(c) => assert_eq!(c.record.street_name, "Grouse Lane"),
            other => panic!("expected confident match, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_prefilter_falls_back_to_full_pool() {
        let pool = streets(&["Grouse Lane", "Grouse Court"]);
        let ranked = ranker().rank("Grouse Road", &pool);
        assert_eq!(ranked.suffix_filter, None);
        assert_eq!(ranked.pool_size, 2);
        assert!(matches!(ranker().resolve("Grouse Road", &pool), MatchClass::Ambiguous(c) if c.len() == 2));
    }

    #[test]
    fn test_no_suffix_keeps_both() {
        let pool = streets(&["Grouse Lane", "Grouse Court"]);
        match ranker().resolve("Grouse", &pool) {
            MatchClass::Ambiguous(c) => {
                assert_eq!(c.len(), 2);
                assert_eq!(c[0].score, 100);
                // equal scores keep storage order
                assert_eq!(c[0].record.street_name, "Grouse Lane");
            }
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    /// Treats every pair of names as identical spellings.
    struct Indifferent;

    impl EditDistance for Indifferent {
        fn distance(&self, _a: &str, _b: &str) -> usize {
            0
        }

        fn name(&self) -> &'static str {
            "indifferent"
        }
    }

    #[test]
    fn test_custom_distance_scorer() {
        let ranker = MatchRanker::with_scorer(
            SimilarityScorer::with_distance(Indifferent),
            ResolverConfig::default(),
        );
        let pool = streets(&["Golf Road"]);
        // KLF == KLF (+50), full edit points (+40), no exact bonus
        let ranked = ranker.rank("Gulf Road", &pool);
        assert_eq!(ranked.top[0].score, 90);
    }

    #[test]
    fn test_no_streets() {
        assert_eq!(ranker().resolve("Grouse Lane", &[]), MatchClass::NoStreets);
    }

    #[test]
    fn test_no_match() {
        let pool = streets(&["Oak Street", "Elm Avenue"]);
        assert_eq!(ranker().resolve("Birchwood", &pool), MatchClass::NoMatch);
    }

    #[test]
    fn test_single_survivor_below_high_confidence() {
        let pool = streets(&["Grouse Lane", "Oak Street"]);
        // KRS == KRS (+50), distance 2/6 -> 27
        let ranked = ranker().rank("Gross", &pool);
        assert_eq!(ranked.survivors, 1);
        assert_eq!(ranked.top[0].score, 77);

        let strict = MatchRanker::new(ResolverConfig::default().with_high_confidence(90));
        let ranked = strict.rank("Gross", &pool);
        assert!(matches!(strict.classify(pool.len(), ranked), MatchClass::Ambiguous(ref c) if c.len() == 1));
    }

    #[test]
    fn test_too_many_matches() {
        let pool = streets(&["Grouse Lane", "Grouse Court", "Grouse Drive", "Grouse Way"]);
        let ranked = ranker().rank("Grouse", &pool);
        assert_eq!(ranked.survivors, 4);
        assert_eq!(ranked.top.len(), 3);
        assert_eq!(
            ranker().classify(pool.len(), ranked),
            MatchClass::TooMany { survivors: 4 }
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = ResolverConfig::default().with_min_score(100);
        let pool = streets(&["Grouse Lane"]);
        let ranked = MatchRanker::new(config).rank("Grouse", &pool);
        assert_eq!(ranked.survivors, 0);
    }

    #[test]
    fn test_large_pool_scores_in_parallel() {
        let mut names: Vec<String> = (0..150).map(|i| format!("Street Number {i} Ave")).collect();
        names.push("Grouse Lane".to_string());
        let pool: Vec<StreetRecord> = names
            .iter()
            .map(|n| StreetRecord::new("rest-001", "60008", n.as_str()))
            .collect();
        let ranked = ranker().rank("Grouse Lane", &pool);
        assert_eq!(ranked.pool_size, 1);

        let ranked = ranker().rank("Grouse", &pool);
        assert_eq!(ranked.pool_size, pool.len());
        assert_eq!(ranked.top[0].record.street_name, "Grouse Lane");
    }
}
