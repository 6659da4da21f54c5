//! News retrieval with query optimization and regional fallback.
//!
//! # Strategies
//!
//! Tried in order, stopping at the first search that returns an article:
//!
//! | # | Query | Country | Attempted when |
//! |---|-------|---------|----------------|
//! | 1 | optimized keyword | region's code | always |
//! | 2 | raw topic | region's code | always |
//! | 3 | keyword fallback | region's code | a fallback trigger occurs in the topic |
//! | 4 | optimized keyword | none | the region has a country code |
//!
//! A failed strategy (transport error, error status, bad body, or zero
//! articles) is logged and the loop moves on. Once every strategy has
//! failed the fetch reports [`NO_ARTICLES_FOUND`] with the last keyword tried.

use super::resolver::resolve;
use crate::api::LanguageModel;
use crate::config::KeywordFallback;
use crate::models::NewsArticle;
use crate::regions::country_code;
use crate::sources::NewsSearch;
use itertools::Itertools;
use std::fmt;
use tracing::{info, instrument, warn};

/// Text reported in place of articles when every strategy came back empty.
pub const NO_ARTICLES_FOUND: &str = "NO_ARTICLES_FOUND";

/// Which search a fetch attempt represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Optimized,
    Raw,
    KeywordFallback,
    Unrestricted,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Optimized => "optimized",
            Strategy::Raw => "raw",
            Strategy::KeywordFallback => "keyword_fallback",
            Strategy::Unrestricted => "unrestricted",
        };
        f.write_str(s)
    }
}

/// One planned search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub strategy: Strategy,
    pub query: String,
    pub country: Option<&'static str>,
}

/// Result of [`NewsFetcher::fetch_news`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsFetch {
    /// A strategy succeeded; `text` holds one line per article.
    Articles { text: String, query_used: String },
    /// All strategies ran without finding an article; `query_used` is the last keyword tried.
    NoArticlesFound { query_used: String },
}

impl NewsFetch {
    /// Article text, or [`NO_ARTICLES_FOUND`].
    pub fn text(&self) -> &str {
        match self {
            NewsFetch::Articles { text, .. } => text,
            NewsFetch::NoArticlesFound { .. } => NO_ARTICLES_FOUND,
        }
    }

    pub fn query_used(&self) -> &str {
        match self {
            NewsFetch::Articles { query_used, .. } | NewsFetch::NoArticlesFound { query_used } => {
                query_used
            }
        }
    }
}

/// First fallback whose trigger occurs in `topic`, compared case-insensitively.
pub fn find_fallback<'a>(topic: &str, fallbacks: &'a [KeywordFallback]) -> Option<&'a str> {
    let lower = topic.to_lowercase();
    fallbacks
        .iter()
        .find(|f| !f.trigger.is_empty() && lower.contains(&f.trigger.to_lowercase()))
        .map(|f| f.keyword.as_str())
}

/// Lay out the attempts for one fetch, in the order they will run.
pub fn plan_attempts(
    topic: &str,
    optimized: &str,
    country: Option<&'static str>,
    fallbacks: &[KeywordFallback],
) -> Vec<Attempt> {
    let mut attempts = vec![
        Attempt {
            strategy: Strategy::Optimized,
            query: optimized.to_string(),
            country,
        },
        Attempt {
            strategy: Strategy::Raw,
            query: topic.to_string(),
            country,
        },
    ];
    if let Some(keyword) = find_fallback(topic, fallbacks) {
        attempts.push(Attempt {
            strategy: Strategy::KeywordFallback,
            query: keyword.to_string(),
            country,
        });
    }
    if country.is_some() {
        attempts.push(Attempt {
            strategy: Strategy::Unrestricted,
            query: optimized.to_string(),
            country: None,
        });
    }
    attempts
}

/// Fold articles into newline-joined prompt text, in API order.
pub fn join_articles(articles: &[NewsArticle]) -> String {
    articles.iter().map(NewsArticle::to_prompt_line).join("\n")
}

/// Runs the strategy loop against a [`NewsSearch`] backend.
pub struct NewsFetcher<'a, S, M> {
    search: &'a S,
    model: &'a M,
    fallbacks: &'a [KeywordFallback],
}

impl<'a, S: NewsSearch, M: LanguageModel> NewsFetcher<'a, S, M> {
    pub fn new(search: &'a S, model: &'a M, fallbacks: &'a [KeywordFallback]) -> Self {
        Self {
            search,
            model,
            fallbacks,
        }
    }

    /// Fetch article text for `topic` within `region`.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_news(&self, topic: &str, region: &str) -> NewsFetch {
        let country = country_code(region);
        let optimized = resolve(self.model, topic).await;
        let attempts = plan_attempts(topic, &optimized, country, self.fallbacks);

        let mut last_query = optimized.clone();
        for attempt in attempts {
            last_query = attempt.query.clone();
            match self.search.search(&attempt.query, attempt.country).await {
                Ok(articles) if !articles.is_empty() => {
                    info!(
                        strategy = %attempt.strategy,
                        query = %attempt.query,
                        count = articles.len(),
                        "Strategy found articles"
                    );
                    return NewsFetch::Articles {
                        text: join_articles(&articles),
                        query_used: attempt.query,
                    };
                }
                Ok(_) => {
                    info!(strategy = %attempt.strategy, query = %attempt.query, "Strategy found no articles");
                }
                Err(e) => {
                    warn!(strategy = %attempt.strategy, query = %attempt.query, error = %e, "Strategy failed");
                }
            }
        }

        warn!(query = %last_query, "All strategies exhausted");
        NewsFetch::NoArticlesFound {
            query_used: last_query,
        }
    }
}
