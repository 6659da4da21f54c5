//! Data models for the analysis pipeline.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsArticle`]: A single article as returned by the news search API
//! - [`Analysis`] / [`Section`]: The three-perspective summary produced by the LLM
//! - [`Settings`] / [`Intensity`]: Per-request knobs supplied by the caller
//! - [`RunContext`]: Values reported alongside a result (model, query used)
//!
//! The wire models use the API's camelCase field names via `serde(rename)`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The publisher of a news article.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A news article as returned by the search API.
///
/// Every field is optional on the wire; missing values render as empty
/// strings when the article is folded into the analysis prompt.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: Option<String>,
    /// Short summary of the story.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
}

impl NewsArticle {
    /// Render the article as one line of prompt text.
    ///
    /// Format: `Source: {name}. Title: {title}. Summary: {description}`
    pub fn to_prompt_line(&self) -> String {
        let source = self
            .source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or_default();
        format!(
            "Source: {}. Title: {}. Summary: {}",
            source,
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}

/// One perspective of an [`Analysis`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    /// Headline for the perspective (e.g. "Stifling Innovation").
    pub title: String,
    /// Supporting points; three are requested from the model but not enforced.
    pub points: Vec<String>,
}

/// The three-perspective summary of a topic.
///
/// All four fields are required when deserializing a model reply, so a
/// reply missing any section fails to parse rather than producing a partial
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Analysis {
    /// The topic as echoed by the model.
    pub topic: String,
    /// Negative view: concerns and risks.
    pub critic: Section,
    /// Neutral view: data and status.
    pub facts: Section,
    /// Positive view: benefits.
    pub proponent: Section,
}

/// How hard the critic section should push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    Standard,
    Skeptical,
    Ruthless,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intensity::Standard => "standard",
            Intensity::Skeptical => "skeptical",
            Intensity::Ruthless => "ruthless",
        };
        f.write_str(s)
    }
}

/// Per-request settings. Immutable for the duration of one pipeline run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Region name, resolved to a country code by [`crate::regions::country_code`].
    pub region: String,
    pub intensity: Intensity,
    /// Skip all network calls and answer from the built-in fixtures.
    pub demo_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: "USA".to_string(),
            intensity: Intensity::Standard,
            demo_mode: false,
        }
    }
}

/// Values reported alongside a pipeline result for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunContext {
    /// The generative model the run used, if any network call was made.
    pub model_name: Option<String>,
    /// The search keyword that produced the articles (or the last one tried).
    pub query_used: Option<String>,
}
