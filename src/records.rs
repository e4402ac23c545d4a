//! Street records and lookup requests

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::normalize::{core_name, normalize};
use crate::algorithms::phonetic::{encode, PhoneticCodes};

/// One known street for one restaurant in one ZIP code.
///
/// Phonetic codes are precomputed from `core_name` by the same encoder the
/// scorer uses, so a stored record always agrees with fresh encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetRecord {
    pub restaurant_id: String,
    pub zip_code: String,
    /// Display form, e.g. "Grouse Ln"
    pub street_name: String,
    #[serde(default)]
    pub phonetic_primary: String,
    #[serde(default)]
    pub phonetic_alternate: String,
    /// Suffix/directional-stripped form, e.g. "GROUSE"
    #[serde(default)]
    pub core_name: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl StreetRecord {
    /// Build a record, deriving the core name and phonetic codes.
    ///
    /// This is the only constructor seeding tools should use.
    pub fn new(
        restaurant_id: impl Into<String>,
        zip_code: impl Into<String>,
        street_name: impl Into<String>,
    ) -> Self {
        let street_name = street_name.into();
        let core = core_name(&street_name);
        let codes = encode(&core);
        Self {
            restaurant_id: restaurant_id.into(),
            zip_code: zip_code.into(),
            street_name,
            phonetic_primary: codes.primary,
            phonetic_alternate: codes.alternate,
            core_name: core,
            created_at: Utc::now(),
        }
    }

    /// Stored phonetic codes, or `None` when the record was stored without them.
    #[must_use]
    pub fn stored_codes(&self) -> Option<PhoneticCodes> {
        if self.phonetic_primary.is_empty() && self.phonetic_alternate.is_empty() {
            None
        } else {
            Some(PhoneticCodes::new(
                self.phonetic_primary.clone(),
                self.phonetic_alternate.clone(),
            ))
        }
    }

    /// Whether the stored core name and codes still match fresh derivation.
    #[must_use]
    pub fn codes_are_current(&self) -> bool {
        let core = core_name(&self.street_name);
        let codes = encode(&core);
        core == self.core_name
            && codes.primary == self.phonetic_primary
            && codes.alternate == self.phonetic_alternate
    }
}

/// Build records for a batch of street names, skipping names that normalize
/// to one already seen (e.g. "Grouse Lane" and "GROUSE LN").
pub fn prepare_street_records<I, S>(restaurant_id: &str, zip_code: &str, names: I) -> Vec<StreetRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = AHashSet::new();
    names
        .into_iter()
        .map(|name| StreetRecord::new(restaurant_id, zip_code, name))
        .filter(|record| !record.core_name.is_empty())
        .filter(|record| seen.insert(normalize(&record.street_name)))
        .collect()
}

fn default_attempt() -> u32 {
    1
}

/// One resolution request, already extracted from whatever wire format the
/// voice assistant used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub restaurant_id: String,
    pub zip_code: String,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub spelled_street_name: Option<String>,
    #[serde(default = "default_attempt")]
    pub attempt_number: u32,
}

impl LookupRequest {
    /// Request for a spoken street name on the first attempt.
    pub fn new(
        restaurant_id: impl Into<String>,
        zip_code: impl Into<String>,
        street_name: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            zip_code: zip_code.into(),
            street_number: None,
            street_name: Some(street_name.into()),
            spelled_street_name: None,
            attempt_number: 1,
        }
    }

    /// Request carrying a spelled-out street name instead of a spoken one.
    pub fn spelled(
        restaurant_id: impl Into<String>,
        zip_code: impl Into<String>,
        spelled: impl Into<String>,
    ) -> Self {
        Self {
            street_name: None,
            spelled_street_name: Some(spelled.into()),
            ..Self::new(restaurant_id, zip_code, String::new())
        }
    }

    #[must_use]
    pub fn with_street_number(mut self, number: impl Into<String>) -> Self {
        self.street_number = Some(number.into());
        self
    }

    #[must_use]
    pub fn with_attempt(mut self, attempt_number: u32) -> Self {
        self.attempt_number = attempt_number;
        self
    }
}

/// A candidate street with its similarity score for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub record: StreetRecord,
    pub score: u32,
}
