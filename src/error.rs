//! Error types for outbound calls, configuration, and the pipeline itself.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Errors from a single call to the news or generative-language API.
///
/// These never escape a pipeline stage; each stage converts them into its
/// ordinary failure value.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no generated text")]
    EmptyReply,
}

/// Errors while loading the YAML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// User-facing pipeline failures.
///
/// Serialized as `{"error": "<message>"}` so callers can tell a failure
/// from an [`crate::models::Analysis`] by the presence of the `error` key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Every fetch strategy ran and none returned an article.
    #[error(
        "No recent articles found for '{query}'. Try broadening the region (e.g. Global) or rephrasing the topic."
    )]
    NoArticlesFound { query: String },

    #[error("Could not retrieve news right now. Check your connection or news API key and try again.")]
    ConnectionFailure,

    #[error("The AI failed to analyze the articles. Please try again.")]
    AnalysisFailure,
}

impl Serialize for PipelineError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}
