use std::path::PathBuf;

/// Failures of the transport layer. HTTP error statuses are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request {method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value `{value}` for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize run report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report file `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
