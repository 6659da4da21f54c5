//! YAML configuration for API endpoints, limits, and keyword fallbacks.
//!
//! Every field has a default, so a missing file (or a file that sets only
//! a few keys) is valid. API keys are not read from here; they come from
//! the CLI / environment (see [`crate::cli::Cli`]).
//!
//! # Example
//!
//! ```yaml
//! language: en
//! max_articles: 8
//! keyword_fallbacks:
//!   - trigger: tvk
//!     keyword: Tamilaga Vettri Kazhagam
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A substring-triggered replacement search keyword.
///
/// When `trigger` appears (case-insensitively) in the user's topic, the
/// fetcher may retry the search with `keyword` instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeywordFallback {
    pub trigger: String,
    pub keyword: String,
}

impl KeywordFallback {
    pub fn new(trigger: &str, keyword: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            keyword: keyword.to_string(),
        }
    }
}

/// Application configuration loaded from `config.yaml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the GNews v4 API.
    pub news_base_url: String,
    /// Article language filter passed to the news API.
    pub language: String,
    /// Result-count cap per search.
    pub max_articles: u32,
    /// Base URL of the generative-language v1beta API.
    pub llm_base_url: String,
    /// Model used when discovery fails.
    pub default_model: String,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
    /// Ordered; the first matching trigger wins.
    pub keyword_fallbacks: Vec<KeywordFallback>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news_base_url: "https://gnews.io/api/v4".to_string(),
            language: "en".to_string(),
            max_articles: 5,
            llm_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            default_model: "gemini-1.5-flash".to_string(),
            request_timeout_secs: 30,
            keyword_fallbacks: default_keyword_fallbacks(),
        }
    }
}

/// Built-in abbreviations for Indian regional politics, where party acronyms
/// rarely match headline wording. Longer triggers come before triggers they contain.
///
/// Triggers are plain substrings, so short ones also fire inside unrelated
/// words ("aap" matches "kaapi"). That only adds one extra search after the
/// first two strategies have failed.
pub fn default_keyword_fallbacks() -> Vec<KeywordFallback> {
    vec![
        KeywordFallback::new("tvk", "Tamilaga Vettri Kazhagam"),
        KeywordFallback::new("aiadmk", "All India Anna Dravida Munnetra Kazhagam"),
        KeywordFallback::new("dmk", "Dravida Munnetra Kazhagam"),
        KeywordFallback::new("bjp", "Bharatiya Janata Party"),
        KeywordFallback::new("aap", "Aam Aadmi Party"),
        KeywordFallback::new("tmc", "Trinamool Congress"),
    ]
}

/// Load configuration from `path`, or defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or is not valid YAML
/// for [`AppConfig`].
#[instrument(level = "info")]
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(AppConfig::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    let config: AppConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    info!(
        path,
        fallbacks = config.keyword_fallbacks.len(),
        "Loaded configuration"
    );
    Ok(config)
}
