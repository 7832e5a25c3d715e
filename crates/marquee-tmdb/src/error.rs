use marquee_core::FETCH_FAILED_MESSAGE;
use thiserror::Error;

/// Errors returned by the TMDB API client.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The service answered 200 but flagged the request as failed in the body.
    #[error("TMDB API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl TmdbError {
    /// Text suitable for showing to a user in place of the result list.
    ///
    /// Service-reported failures carry the service's own message; every other
    /// failure collapses to a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TmdbError::ApiError(message) => message.clone(),
            TmdbError::Http(_)
            | TmdbError::UnexpectedStatus { .. }
            | TmdbError::Deserialize { .. }
            | TmdbError::InvalidBaseUrl { .. } => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}
