use thiserror::Error;

/// Failure of one provider call. Adapters never return partial results.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} responded with HTTP {status}")]
    Transport { provider: &'static str, status: u16 },

    /// Connection error, timeout, or unreadable body.
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The body is not JSON or lacks a required field.
    #[error("malformed {provider} record: {detail}")]
    MalformedRecord {
        provider: &'static str,
        detail: String,
    },

    /// The provider had nothing to return. Not a failure of the request.
    #[error("{provider} returned no results")]
    EmptyResult { provider: &'static str },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ProviderError {
    pub fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        ProviderError::MalformedRecord {
            provider,
            detail: detail.into(),
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, ProviderError::EmptyResult { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
