//! Street resolution service
//!
//! [`StreetResolver`] turns a [`LookupRequest`] into an [`Outcome`]:
//! validate the request, pick the search term (spelled input wins), load the
//! restaurant's streets for the ZIP through the cache, then rank and classify.
//!
//! # Example
//! ```
//! use streetmatch::records::{LookupRequest, StreetRecord};
//! use streetmatch::resolver::{InMemoryStreetSource, StreetResolver};
//! use streetmatch::Outcome;
//!
//! let mut source = InMemoryStreetSource::new();
//! source.insert(StreetRecord::new("rest-001", "60008", "Grouse Lane"));
//! source.insert(StreetRecord::new("rest-001", "60008", "Grouse Court"));
//!
//! let resolver = StreetResolver::new(source);
//! let request = LookupRequest::new("rest-001", "60008", "Grouse Lane").with_street_number("2202");
//! match resolver.resolve(&request) {
//!     Outcome::Found { formatted_address, .. } => assert_eq!(formatted_address, "2202 Grouse Lane"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

use std::sync::Arc;

use ahash::AHashMap;

use crate::algorithms::spelled;
use crate::cache::{cache_key, CandidateCache};
use crate::config::ResolverConfig;
use crate::error::{FetchError, ResolveError};
use crate::matching::{MatchClass, MatchRanker};
use crate::outcome::Outcome;
use crate::records::{LookupRequest, StreetRecord};

/// Where known streets come from (a database table, a service, a fixture).
pub trait StreetSource: Send + Sync {
    /// All streets stored for the restaurant in the ZIP. An empty list means
    /// the ZIP is not covered.
    fn fetch_streets(&self, restaurant_id: &str, zip_code: &str) -> Result<Vec<StreetRecord>, FetchError>;
}

impl<F> StreetSource for F
where
    F: Fn(&str, &str) -> Result<Vec<StreetRecord>, FetchError> + Send + Sync,
{
    fn fetch_streets(&self, restaurant_id: &str, zip_code: &str) -> Result<Vec<StreetRecord>, FetchError> {
        self(restaurant_id, zip_code)
    }
}

/// Street source backed by a map, for tests and local tools.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStreetSource {
    streets: AHashMap<String, Vec<StreetRecord>>,
}

impl InMemoryStreetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: StreetRecord) {
        self.streets
            .entry(cache_key(&record.restaurant_id, &record.zip_code))
            .or_default()
            .push(record);
    }

    pub fn extend<I: IntoIterator<Item = StreetRecord>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.streets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }
}

impl FromIterator<StreetRecord> for InMemoryStreetSource {
    fn from_iter<I: IntoIterator<Item = StreetRecord>>(iter: I) -> Self {
        let mut source = Self::new();
        source.extend(iter);
        source
    }
}

impl StreetSource for InMemoryStreetSource {
    fn fetch_streets(&self, restaurant_id: &str, zip_code: &str) -> Result<Vec<StreetRecord>, FetchError> {
        Ok(self
            .streets
            .get(&cache_key(restaurant_id, zip_code))
            .cloned()
            .unwrap_or_default())
    }
}

/// Trimmed field value, or `None` when blank.
fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// Search term for a request: decoded spelling, else the raw spelled text,
/// else the spoken name.
fn search_term(request: &LookupRequest) -> Option<String> {
    if let Some(spelled_text) = request.spelled_street_name.as_deref().and_then(non_blank) {
        let decoded = spelled::decode(spelled_text);
        if decoded.is_empty() {
            tracing::debug!(raw = spelled_text, "spelled name did not decode, using it literally");
            return Some(spelled_text.to_string());
        }
        return Some(decoded);
    }
    request.street_name.as_deref().and_then(non_blank).map(str::to_string)
}

/// Resolves heard street names against a restaurant's known streets.
pub struct StreetResolver<S> {
    source: S,
    cache: CandidateCache,
    ranker: MatchRanker,
}

impl<S: StreetSource> StreetResolver<S> {
    /// Resolver with default thresholds and its own cache.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    pub fn with_config(source: S, config: ResolverConfig) -> Self {
        let cache = CandidateCache::with_ttl(config.cache_ttl());
        Self::with_cache(source, config, cache)
    }

    /// Resolver sharing an existing cache handle.
    pub fn with_cache(source: S, config: ResolverConfig, cache: CandidateCache) -> Self {
        Self {
            source,
            cache,
            ranker: MatchRanker::new(config),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        self.ranker.config()
    }

    pub fn cache(&self) -> &CandidateCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Streets for the pair, from cache when fresh, else from the source.
    ///
    /// Empty lists are not cached so a newly seeded ZIP is seen immediately.
    fn streets_for(&self, restaurant_id: &str, zip_code: &str) -> Result<Arc<[StreetRecord]>, FetchError> {
        if let Some(streets) = self.cache.get(restaurant_id, zip_code) {
            tracing::debug!(restaurant_id, zip_code, count = streets.len(), "street list cache hit");
            return Ok(streets);
        }
        let streets = self.source.fetch_streets(restaurant_id, zip_code)?;
        tracing::debug!(restaurant_id, zip_code, count = streets.len(), "fetched street list");
        if streets.is_empty() {
            return Ok(Arc::from(streets));
        }
        Ok(self.cache.put(restaurant_id, zip_code, streets))
    }

    /// Resolve a request, surfacing input and upstream failures as errors.
    pub fn try_resolve(&self, request: &LookupRequest) -> Result<Outcome, ResolveError> {
        let restaurant_id = non_blank(&request.restaurant_id).ok_or(ResolveError::MissingRestaurantId)?;
        let zip_code = non_blank(&request.zip_code).ok_or(ResolveError::MissingZipCode)?;
        let term = search_term(request).ok_or(ResolveError::MissingStreetName)?;

        let streets = self.streets_for(restaurant_id, zip_code)?;

        let outcome = match self.ranker.resolve(&term, &streets) {
            MatchClass::NoStreets => Outcome::zip_not_covered(restaurant_id, zip_code),
            MatchClass::NoMatch => Outcome::not_found(request.attempt_number),
            MatchClass::Confident(candidate) => {
                Outcome::found(&candidate, request.street_number.as_deref(), zip_code)
            }
            MatchClass::TooMany { .. } => Outcome::too_many_matches(),
            MatchClass::Ambiguous(candidates) => Outcome::ambiguous(&candidates),
        };

        tracing::debug!(
            restaurant_id,
            zip_code,
            term = %term,
            attempt = request.attempt_number,
            status = outcome.status(),
            "resolved street"
        );
        Ok(outcome)
    }

    /// Resolve a request. Never fails: errors become [`Outcome::Error`].
    pub fn resolve(&self, request: &LookupRequest) -> Outcome {
        match self.try_resolve(request) {
            Ok(outcome) => outcome,
            Err(ResolveError::Upstream(source)) => {
                tracing::warn!(
                    restaurant_id = %request.restaurant_id,
                    zip_code = %request.zip_code,
                    error = %source,
                    "street fetch failed"
                );
                Outcome::error(ResolveError::Upstream(source).to_string())
            }
            Err(err) => Outcome::error(err.to_string()),
        }
    }
}
