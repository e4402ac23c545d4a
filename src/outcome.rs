//! Resolution outcomes and the voice prompts attached to them
//!
//! Every request ends in exactly one [`Outcome`]. Display strings are
//! speech-expanded ("Grouse Lane", never "GROUSE LN"); matching never sees them.

use serde::{Deserialize, Serialize};

use crate::algorithms::normalize::expand_for_speech;
use crate::records::ScoredCandidate;

/// What the voice assistant should do next after a failed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestAction {
    RequestSpelling,
    HumanHandoff,
    VerifyZip,
}

/// A candidate name with its score, as reported for ambiguous matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub street: String,
    pub score: u32,
}

/// Result of one street resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    #[serde(rename_all = "camelCase")]
    Found {
        street_name: String,
        formatted_address: String,
        zip_code: String,
        score: u32,
        confirm_prompt: String,
    },
    #[serde(rename_all = "camelCase")]
    Ambiguous {
        candidates: Vec<String>,
        scores: Vec<CandidateScore>,
        clarify_prompt: String,
    },
    #[serde(rename_all = "camelCase")]
    NotFound {
        suggest_action: SuggestAction,
        prompt: String,
    },
    #[serde(rename_all = "camelCase")]
    ZipNotCovered {
        restaurant_id: String,
        zip_code: String,
        message: String,
        suggest_action: SuggestAction,
    },
    #[serde(rename_all = "camelCase")]
    TooManyMatches {
        suggest_action: SuggestAction,
        prompt: String,
    },
    Error {
        message: String,
    },
}

impl Outcome {
    /// Confident match, phrased for confirmation.
    pub fn found(candidate: &ScoredCandidate, street_number: Option<&str>, zip_code: &str) -> Self {
        let street_name = expand_for_speech(&candidate.record.street_name);
        let formatted_address = match street_number.map(str::trim).filter(|n| !n.is_empty()) {
            Some(number) => format!("{number} {street_name}"),
            None => street_name.clone(),
        };
        let confirm_prompt = format!("I have {formatted_address}. Is that correct?");
        Self::Found {
            street_name,
            formatted_address,
            zip_code: zip_code.to_string(),
            score: candidate.score,
            confirm_prompt,
        }
    }

    /// Up to a handful of plausible streets for the caller to choose from.
    pub fn ambiguous(candidates: &[ScoredCandidate]) -> Self {
        let names: Vec<String> = candidates
            .iter()
            .map(|c| expand_for_speech(&c.record.street_name))
            .collect();
        let scores = names
            .iter()
            .zip(candidates)
            .map(|(street, c)| CandidateScore {
                street: street.clone(),
                score: c.score,
            })
            .collect();
        let clarify_prompt = format!("Did you mean {}?", join_with_or(&names));
        Self::Ambiguous {
            candidates: names,
            scores,
            clarify_prompt,
        }
    }

    /// No survivors: ask for spelling first, then hand off.
    pub fn not_found(attempt_number: u32) -> Self {
        if attempt_number <= 1 {
            Self::NotFound {
                suggest_action: SuggestAction::RequestSpelling,
                prompt: "I couldn't find that street. Could you spell the street name for me?".to_string(),
            }
        } else {
            Self::NotFound {
                suggest_action: SuggestAction::HumanHandoff,
                prompt: "I'm still having trouble finding that street. Let me connect you with someone who can help."
                    .to_string(),
            }
        }
    }

    pub fn zip_not_covered(restaurant_id: &str, zip_code: &str) -> Self {
        Self::ZipNotCovered {
            restaurant_id: restaurant_id.to_string(),
            zip_code: zip_code.to_string(),
            message: format!("We don't have any delivery streets on file for ZIP code {zip_code}."),
            suggest_action: SuggestAction::VerifyZip,
        }
    }

    pub fn too_many_matches() -> Self {
        Self::TooManyMatches {
            suggest_action: SuggestAction::RequestSpelling,
            prompt: "Several streets sound similar to that. Could you spell the street name for me?".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Wire name of the variant, as used in the `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Found { .. } => "found",
            Self::Ambiguous { .. } => "ambiguous",
            Self::NotFound { .. } => "not_found",
            Self::ZipNotCovered { .. } => "zip_not_covered",
            Self::TooManyMatches { .. } => "too_many_matches",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// "A", "A or B", "A, B, or C".
fn join_with_or(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::StreetRecord;
    use serde_json::json;

    fn candidate(name: &str, score: u32) -> ScoredCandidate {
        ScoredCandidate {
            record: StreetRecord::new("rest-001", "60008", name),
            score,
        }
    }

    #[test]
    fn test_join_with_or() {
        let names = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_with_or(&names(&["A"])), "A");
        assert_eq!(join_with_or(&names(&["A", "B"])), "A or B");
        assert_eq!(join_with_or(&names(&["A", "B", "C"])), "A, B, or C");
    }

    #[test]
    fn test_found_expands_for_speech() {
        let outcome = Outcome::found(&candidate("GROUSE LN", 100), Some("2202"), "60008");
        match outcome {
            Outcome::Found {
                street_name,
                formatted_address,
                confirm_prompt,
                ..
            } => {
                assert_eq!(street_name, "Grouse Lane");
                assert_eq!(formatted_address, "2202 Grouse Lane");
                assert_eq!(confirm_prompt, "I have 2202 Grouse Lane. Is that correct?");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_found_without_number() {
        let outcome = Outcome::found(&candidate("Golf Rd", 80), None, "60008");
        assert!(matches!(outcome, Outcome::Found { ref formatted_address, .. } if formatted_address == "Golf Road"));
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(Outcome::found(&candidate("Grouse Lane", 100), Some("2202"), "60008")).unwrap();
        assert_eq!(value["status"], "found");
        assert_eq!(value["formattedAddress"], "2202 Grouse Lane");
        assert_eq!(value["zipCode"], "60008");

        let value = serde_json::to_value(Outcome::not_found(2)).unwrap();
        assert_eq!(value["status"], "not_found");
        assert_eq!(value["suggestAction"], "human_handoff");

        let value = serde_json::to_value(Outcome::zip_not_covered("rest-001", "99999")).unwrap();
        assert_eq!(value["suggestAction"], "verify_zip");
        assert_eq!(value["restaurantId"], "rest-001");
    }

    #[test]
    fn test_ambiguous_shape() {
        let outcome = Outcome::ambiguous(&[candidate("Grouse Lane", 90), candidate("Grouse Ct", 90)]);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "status": "ambiguous",
                "candidates": ["Grouse Lane", "Grouse Court"],
                "scores": [
                    {"street": "Grouse Lane", "score": 90},
                    {"street": "Grouse Court", "score": 90}
                ],
                "clarifyPrompt": "Did you mean Grouse Lane or Grouse Court?"
            })
        );
    }

    #[test]
    fn test_attempt_policy() {
        assert!(matches!(
            Outcome::not_found(1),
            Outcome::NotFound { suggest_action: SuggestAction::RequestSpelling, .. }
        ));
        assert!(matches!(
            Outcome::not_found(3),
            Outcome::NotFound { suggest_action: SuggestAction::HumanHandoff, .. }
        ));
    }

    #[test]
    fn test_status_matches_tag() {
        for outcome in [Outcome::too_many_matches(), Outcome::error("x"), Outcome::not_found(1)] {
            let value = serde_json::to_value(&outcome).unwrap();
            assert_eq!(value["status"], outcome.status());
        }
    }
}
