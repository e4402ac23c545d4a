//! Heard-vs-stored street similarity
//!
//! A score in `[0, 100]` built from three parts, summed:
//! - phonetic agreement of the core names (best single tier: 50 / 40 / 30 / 0)
//! - normalized Levenshtein similarity of the lower-cased core names, scaled to 40
//! - an exact-match bonus of 10
//!
//! The downstream thresholds (30 relevance, 70 high confidence) are tuned to
//! exactly this arithmetic.

use crate::algorithms::normalize::core_name;
use crate::algorithms::phonetic::{encode, PhoneticCodes};
use crate::algorithms::{EditDistance, Levenshtein};

/// Primary code equals primary code.
pub const PRIMARY_MATCH_POINTS: u32 = 50;
/// Primary code of one side equals alternate code of the other.
pub const CROSS_MATCH_POINTS: u32 = 40;
/// Alternate codes agree.
pub const ALTERNATE_MATCH_POINTS: u32 = 30;
/// Weight of the normalized edit-distance similarity.
pub const EDIT_SIMILARITY_POINTS: u32 = 40;
/// Identical core names.
pub const EXACT_MATCH_BONUS: u32 = 10;
/// Highest attainable score.
pub const MAX_SCORE: u32 = PRIMARY_MATCH_POINTS + EDIT_SIMILARITY_POINTS + EXACT_MATCH_BONUS;

/// A caller utterance reduced once and reused against every candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeardName {
    core: String,
    lower: String,
    codes: PhoneticCodes,
}

impl HeardName {
    #[must_use]
    pub fn new(heard: &str) -> Self {
        let core = core_name(heard);
        let lower = core.to_lowercase();
        let codes = encode(&core);
        Self { core, lower, codes }
    }

    /// Core name ("GROUSE" for "Grouse Lane"); empty when nothing usable was heard.
    #[must_use]
    pub fn core(&self) -> &str {
        &self.core
    }

    #[must_use]
    pub fn codes(&self) -> &PhoneticCodes {
        &self.codes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }
}

/// Points for the single best phonetic tier.
///
/// Codes are compared as-is: two all-silent names ("H") share their empty
/// codes. Names with no usable core never reach this point.
#[must_use]
pub fn phonetic_points(heard: &PhoneticCodes, candidate: &PhoneticCodes) -> u32 {
    if heard.primary == candidate.primary {
        PRIMARY_MATCH_POINTS
    } else if heard.primary == candidate.alternate || heard.alternate == candidate.primary {
        CROSS_MATCH_POINTS
    } else if heard.alternate == candidate.alternate {
        ALTERNATE_MATCH_POINTS
    } else {
        0
    }
}

/// Scores candidates against a heard name with a pluggable edit distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer<D = Levenshtein> {
    distance: D,
}

impl SimilarityScorer<Levenshtein> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: EditDistance> SimilarityScorer<D> {
    #[must_use]
    pub fn with_distance(distance: D) -> Self {
        Self { distance }
    }

    /// Score one candidate street name against a prepared heard name.
    ///
    /// `precomputed` are the candidate's stored codes; when absent the
    /// candidate's core name is encoded on the fly.
    #[must_use]
    pub fn score_heard(&self, heard: &HeardName, candidate: &str, precomputed: Option<&PhoneticCodes>) -> u32 {
        let candidate_core = core_name(candidate);
        if heard.is_empty() || candidate_core.is_empty() {
            return 0;
        }

        let fresh;
        let candidate_codes = match precomputed {
            Some(codes) => codes,
            None => {
                fresh = encode(&candidate_core);
                &fresh
            }
        };

        let candidate_lower = candidate_core.to_lowercase();
        let similarity = self.distance.similarity(&heard.lower, &candidate_lower);
        let edit_points = (similarity * f64::from(EDIT_SIMILARITY_POINTS)).round() as u32;
        let bonus = if heard.lower == candidate_lower {
            EXACT_MATCH_BONUS
        } else {
            0
        };

        phonetic_points(&heard.codes, candidate_codes) + edit_points + bonus
    }

    /// Score raw heard text against a candidate street name.
    #[must_use]
    pub fn score(&self, heard: &str, candidate: &str, precomputed: Option<&PhoneticCodes>) -> u32 {
        self.score_heard(&HeardName::new(heard), candidate, precomputed)
    }
}

/// Score heard text against a candidate with the default Levenshtein scorer.
///
/// # Examples
/// ```
/// use streetmatch::matching::scoring::{score, MAX_SCORE};
///
/// assert_eq!(score("Grouse Lane", "Grouse Ln", None), MAX_SCORE);
/// assert_eq!(score("Street", "Grouse Ln", None), 0);
/// ```
#[must_use]
pub fn score(heard: &str, candidate: &str, precomputed: Option<&PhoneticCodes>) -> u32 {
    SimilarityScorer::new().score(heard, candidate, precomputed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_core_is_max() {
        assert_eq!(MAX_SCORE, 100);
        assert_eq!(score("Grouse", "Grouse", None), 100);
        assert_eq!(score("North Grouse Lane", "grouse ln.", None), 100);
    }

    #[test]
    fn test_empty_core_short_circuits() {
        assert_eq!(score("", "Grouse Ln", None), 0);
        assert_eq!(score("Grouse", "North Street", None), 0);
        assert_eq!(score("123", "123", None), 0);
    }

    #[test]
    fn test_golf_gulf() {
        // primary KLF == KLF (+50), distance 1/4 -> 0.75 * 40 = 30
        assert_eq!(score("Gulf Road", "Golf Road", None), 80);
    }

    #[test]
    fn test_lynn_heard_for_lane() {
        // LN == LN (+50), distance 2/4 -> 20
        assert_eq!(score("Lynn", "Lane", None), 70);
    }

    #[test]
    fn test_unrelated_names() {
        // no phonetic tier, distance 3/3 -> 0
        assert_eq!(score("Oak", "Elm", None), 0);
    }

    #[test]
    fn test_cross_tier() {
        // Smith: SM0 / XMT; Schmidt: XMT / SMT -> heard alternate == candidate primary
        let s = score("Smith", "Schmidt", None);
        let edit = (levenshtein_points("smith", "schmidt")) as u32;
        assert_eq!(s, CROSS_MATCH_POINTS + edit);
    }

    fn levenshtein_points(a: &str, b: &str) -> f64 {
        (Levenshtein.similarity(a, b) * f64::from(EDIT_SIMILARITY_POINTS)).round()
    }

    #[test]
    fn test_tiers_do_not_accumulate() {
        let heard = PhoneticCodes::new("KLF", "KLF");
        let candidate = PhoneticCodes::new("KLF", "KLF");
        assert_eq!(phonetic_points(&heard, &candidate), PRIMARY_MATCH_POINTS);
        let candidate = PhoneticCodes::new("XYZ", "KLF");
        assert_eq!(phonetic_points(&heard, &candidate), CROSS_MATCH_POINTS);
        let heard = PhoneticCodes::new("ABC", "KLF");
        let candidate = PhoneticCodes::new("XYZ", "KLF");
        assert_eq!(phonetic_points(&heard, &candidate), ALTERNATE_MATCH_POINTS);
    }

    #[test]
    fn test_silent_core_scores_max_against_itself() {
        assert_eq!(encode("H"), PhoneticCodes::default());
        assert_eq!(
            phonetic_points(&PhoneticCodes::default(), &PhoneticCodes::default()),
            PRIMARY_MATCH_POINTS
        );
        assert_eq!(score("H Street", "H Street", None), MAX_SCORE);
        // no tier against a voiced name
        assert_eq!(score("H Street", "Oak Street", None), 0);
    }

    #[test]
    fn test_precomputed_codes_are_used() {
        let bogus = PhoneticCodes::new("QQQ", "QQQ");
        // edit similarity and bonus still apply, phonetic tier does not
        assert_eq!(score("Grouse", "Grouse Ln", Some(&bogus)), 50);
    }

    #[test]
    fn test_order_of_arguments() {
        // Fresh encoding on both sides makes the score symmetric; only stale
        // precomputed codes can make the two orders disagree.
        assert_eq!(score("Grouse", "Grose", None), score("Grose", "Grouse", None));
        assert_eq!(score("Smith", "Schmidt", None), score("Schmidt", "Smith", None));
        let stale = PhoneticCodes::new("QQQ", "QQQ");
        assert_ne!(
            score("Grouse", "Grose", Some(&stale)),
            score("Grose", "Grouse", None)
        );
    }
}
