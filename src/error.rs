//! Error types for street resolution.

use thiserror::Error;

/// Failure reported by a [`StreetSource`](crate::resolver::StreetSource).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The backing store could not be reached.
    #[error("street source unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("street source failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    /// Wrap an arbitrary backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Reasons a lookup request cannot be resolved into a match outcome.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Restaurant ID is required")]
    MissingRestaurantId,

    #[error("ZIP code is required")]
    MissingZipCode,

    #[error("Street name or spelled street name is required")]
    MissingStreetName,

    /// Display text is deliberately generic; the source is kept for logs.
    #[error("Unable to look up streets right now. Please try again.")]
    Upstream(#[from] FetchError),
}

impl ResolveError {
    /// Whether the request itself was malformed, as opposed to an upstream failure.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Upstream(_))
    }
}

/// Invalid resolver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Payload that could not be turned into a lookup request.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Invalid request payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request payload has no arguments object")]
    MissingArguments,

    #[error("Field '{field}' has unexpected type: expected {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
}
