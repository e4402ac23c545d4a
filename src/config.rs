//! Resolver configuration
//!
//! The default thresholds are behavioral contracts: downstream voice prompts
//! are worded around exactly these cutoffs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning knobs for [`StreetResolver`](crate::resolver::StreetResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Candidates scoring at or below this are discarded.
    pub min_score: u32,
    /// A lone survivor at or above this is a confident match.
    pub high_confidence: u32,
    /// Most candidates ever read back to a caller.
    pub max_candidates: usize,
    /// Lifetime of cached street lists, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_score: 30,
            high_confidence: 70,
            max_candidates: 3,
            cache_ttl_secs: 600,
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Examples
    /// ```
    /// use streetmatch::config::ResolverConfig;
    ///
    /// let config = ResolverConfig::from_json(r#"{"cacheTtlSecs": 60}"#).unwrap();
    /// assert_eq!(config.cache_ttl_secs, 60);
    /// assert_eq!(config.high_confidence, 70);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high_confidence <= self.min_score {
            return Err(ConfigError::Invalid(format!(
                "highConfidence ({}) must exceed minScore ({})",
                self.high_confidence, self.min_score
            )));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Invalid("maxCandidates must be at least 1".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    #[must_use]
    pub fn with_high_confidence(mut self, high_confidence: u32) -> Self {
        self.high_confidence = high_confidence;
        self
    }

    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
