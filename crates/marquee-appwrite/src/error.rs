use thiserror::Error;

/// Errors returned by the Appwrite client.
#[derive(Debug, Error)]
pub enum AppwriteError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Appwrite answered with a non-2xx status.
    #[error("Appwrite API error {status} ({kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("search term is empty after normalization")]
    EmptySearchTerm,
}
