//! Property-based tests for encoding, normalization and scoring.

use proptest::prelude::*;
use streetmatch::algorithms::phonetic::DEFAULT_CODE_LENGTH;
use streetmatch::matching::scoring::{score, MAX_SCORE};
use streetmatch::{core_name, decode_spelled, encode, normalize};

// ============================================================================
// Test Data Generators
// ============================================================================

/// Street-like text: a few words, some punctuation, occasional suffixes.
fn street_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z]{1,10}[.,]?", 1..4).prop_map(|words| words.join(" "))
}

/// Arbitrary printable text.
fn noisy_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>().prop_filter("printable", |c| !c.is_control()), 0..30)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_encode_is_deterministic(word in noisy_strategy()) {
        prop_assert_eq!(encode(&word), encode(&word));
    }

    #[test]
    fn prop_codes_are_bounded(word in noisy_strategy()) {
        let codes = encode(&word);
        prop_assert!(codes.primary.chars().count() <= DEFAULT_CODE_LENGTH);
        prop_assert!(codes.alternate.chars().count() <= DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn prop_score_is_bounded(heard in street_strategy(), street in street_strategy()) {
        prop_assert!(score(&heard, &street, None) <= MAX_SCORE);
    }

    #[test]
    fn prop_self_score_is_max(street in street_strategy()) {
        let core = core_name(&street);
        prop_assume!(!core.is_empty());
        prop_assert_eq!(score(&street, &street, None), MAX_SCORE);
    }

    #[test]
    fn prop_fresh_score_is_symmetric(a in street_strategy(), b in street_strategy()) {
        prop_assert_eq!(score(&a, &b, None), score(&b, &a, None));
    }

    #[test]
    fn prop_normalize_is_idempotent(street in street_strategy()) {
        let once = normalize(&street);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_decode_yields_letters_only(text in noisy_strategy()) {
        prop_assert!(decode_spelled(&text).chars().all(|c| c.is_ascii_uppercase()));
    }
}
