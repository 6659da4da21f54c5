//! News search backends.
//!
//! Each backend implements [`NewsSearch`]: one keyword query, optionally
//! restricted to a country, returning articles in the API's own order.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | GNews | [`gnews`] | REST `GET /search` | Requires API key; `country` filter optional |
//!
//! A non-2xx status or undecodable body is an error; an empty article list
//! is an ordinary `Ok(vec![])` so callers can tell "nothing found" from
//! "search failed".

use crate::error::ApiError;
use crate::models::NewsArticle;

pub mod gnews;

/// Trait for a keyword news search.
pub trait NewsSearch {
    /// Search for `query`, limited to `country` (a two-letter code) when given.
    async fn search(&self, query: &str, country: Option<&str>)
    -> Result<Vec<NewsArticle>, ApiError>;
}
