use thiserror::Error;

/// Errors returned by the GDELT Doc API client.
#[derive(Debug, Error)]
pub enum GdeltError {
    /// Network or TLS failure from the underlying HTTP client, or a
    /// non-2xx response status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    #[error("invalid GDELT base URL: {0}")]
    InvalidBaseUrl(String),
}
