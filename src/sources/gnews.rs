//! GNews search client.
//!
//! Queries [GNews](https://gnews.io) `v4/search`. Parameters: `q`, `lang`,
//! `max`, `apikey` and an optional `country`.

use super::NewsSearch;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::NewsArticle;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default, rename = "totalArticles")]
    total_articles: u64,
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

/// [`NewsSearch`] backed by the GNews REST API.
#[derive(Debug, Clone)]
pub struct GNewsClient {
    http: Client,
    base_url: String,
    api_key: String,
    language: String,
    max_articles: u32,
}

impl GNewsClient {
    pub fn new(http: Client, config: &AppConfig, api_key: &str) -> Self {
        Self {
            http,
            base_url: config.news_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: config.language.clone(),
            max_articles: config.max_articles,
        }
    }

    /// Build the search URL for one query.
    fn search_url(&self, query: &str, country: Option<&str>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("lang", &self.language)
                .append_pair("max", &self.max_articles.to_string())
                .append_pair("apikey", &self.api_key);
            if let Some(code) = country {
                pairs.append_pair("country", code);
            }
        }
        Ok(url)
    }
}

impl NewsSearch for GNewsClient {
    #[instrument(level = "info", skip(self, country), fields(country = country.unwrap_or("any")))]
    async fn search(
        &self,
        query: &str,
        country: Option<&str>,
    ) -> Result<Vec<NewsArticle>, ApiError> {
        let t0 = Instant::now();
        let url = self.search_url(query, country)?;

        let resp = self.http.get(url).send().await.map_err(|e| e.without_url())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.without_url())?;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms, "News search returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 200),
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        info!(
            count = parsed.articles.len(),
            total = parsed.total_articles,
            elapsed_ms,
            "News search completed"
        );
        debug!(titles = ?parsed.articles.iter().map(|a| a.title.as_deref()).collect::<Vec<_>>(), "Article titles");
        Ok(parsed.articles)
    }
}
