//! The analysis pipeline: Resolver → Fetcher → Synthesizer.
//!
//! Submodules:
//! - [`resolver`]: raw topic → optimized search keyword
//! - [`fetcher`]: strategy loop over the news search backend
//! - [`synthesizer`]: article text → [`Analysis`]
//!
//! [`Pipeline::get_analysis`] sequences the stages and maps their failure
//! values onto [`PipelineError`]. Stages run strictly one after another.

pub mod fetcher;
pub mod resolver;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod testing;

use crate::api::LanguageModel;
use crate::config::KeywordFallback;
use crate::demo::demo_analysis;
use crate::error::PipelineError;
use crate::models::{Analysis, RunContext, Settings};
use crate::sources::NewsSearch;
use fetcher::{NewsFetch, NewsFetcher};
use serde_json::json;
use synthesizer::synthesize;
use tracing::{error, info, instrument};

/// Result of one pipeline run plus the values reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub result: Result<Analysis, PipelineError>,
    pub context: RunContext,
}

impl Outcome {
    /// Serialize as the Analysis object or as `{"error": "..."}`.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.result {
            Ok(analysis) => json!(analysis),
            Err(e) => json!(e),
        }
    }
}

/// Offline outcome for demo mode. Touches no network.
pub fn demo_outcome(topic: &str) -> Outcome {
    Outcome {
        result: Ok(demo_analysis(topic)),
        context: RunContext::default(),
    }
}

/// The pipeline wired to a search backend and a language model.
pub struct Pipeline<'a, S, M> {
    search: &'a S,
    model: &'a M,
    fallbacks: &'a [KeywordFallback],
}

impl<'a, S: NewsSearch, M: LanguageModel> Pipeline<'a, S, M> {
    pub fn new(search: &'a S, model: &'a M, fallbacks: &'a [KeywordFallback]) -> Self {
        Self {
            search,
            model,
            fallbacks,
        }
    }

    /// Run the full pipeline for `topic`.
    ///
    /// In demo mode no backend is called. Otherwise the outcome's context
    /// reports the model used and the query that produced the articles (or
    /// the last one tried).
    #[instrument(level = "info", skip(self, settings), fields(region = %settings.region, intensity = %settings.intensity, demo = settings.demo_mode))]
    pub async fn get_analysis(&self, topic: &str, settings: &Settings) -> Outcome {
        if settings.demo_mode {
            return demo_outcome(topic);
        }

        let mut context = RunContext {
            model_name: Some(self.model.model_name().to_string()),
            query_used: None,
        };

        let fetcher = NewsFetcher::new(self.search, self.model, self.fallbacks);
        let fetched = fetcher.fetch_news(topic, &settings.region).await;
        context.query_used = Some(fetched.query_used().to_string());
        info!(query = %fetched.query_used(), text_bytes = fetched.text().len(), "Fetch finished");

        let (text, query_used) = match fetched {
            NewsFetch::Articles { text, query_used } => (text, query_used),
            NewsFetch::NoArticlesFound { query_used } => {
                return Outcome {
                    result: Err(PipelineError::NoArticlesFound { query: query_used }),
                    context,
                };
            }
        };
        if text.trim().is_empty() {
            error!(query = %query_used, "News fetch returned blank text");
            return Outcome {
                result: Err(PipelineError::ConnectionFailure),
                context,
            };
        }

        let result = match synthesize(self.model, &query_used, &text, settings.intensity).await {
            Some(analysis) => {
                info!(topic = %analysis.topic, "Pipeline completed");
                Ok(analysis)
            }
            None => Err(PipelineError::AnalysisFailure),
        };
        Outcome { result, context }
    }
}
