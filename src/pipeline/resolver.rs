//! Topic → search keyword rewriting.
//!
//! Asks the language model for a short English news-search keyword. Any
//! failure degrades silently to the raw topic.

use crate::api::LanguageModel;
use crate::utils::truncate_for_log;
use tracing::{info, instrument, warn};

/// Build the keyword-rewrite prompt for `raw_topic`.
pub fn resolver_prompt(raw_topic: &str) -> String {
    format!(
        "You optimize news search queries.\n\
         Convert the user's topic into the best 2-3 word English keyword for a news search engine.\n\
         If the topic names a local or regional person, party, place or event, use its most common \
         English transliteration as it appears in English-language headlines.\n\
         Reply with the keyword only: no quotes, no punctuation, no explanation.\n\n\
         Topic: {raw_topic}"
    )
}

/// Reduce a model reply to a bare keyword.
///
/// Takes the first non-empty line and strips surrounding quotes, backticks
/// and trailing periods. Returns `None` when nothing usable remains.
pub fn clean_keyword(reply: &str) -> Option<String> {
    let line = reply.lines().map(str::trim).find(|l| !l.is_empty())?;
    let keyword = line
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
        .trim_end_matches('.')
        .trim();
    (!keyword.is_empty()).then(|| keyword.to_string())
}

/// Resolve `raw_topic` to an optimized keyword, or return it unchanged.
#[instrument(level = "info", skip(model))]
pub async fn resolve<M: LanguageModel>(model: &M, raw_topic: &str) -> String {
    match model.generate(&resolver_prompt(raw_topic)).await {
        Ok(reply) => match clean_keyword(&reply) {
            Some(keyword) => {
                info!(%keyword, "Resolved search keyword");
                keyword
            }
            None => {
                warn!(reply = %truncate_for_log(&reply, 120), "Empty keyword reply; using raw topic");
                raw_topic.to_string()
            }
        },
        Err(e) => {
            warn!(error = %e, "Keyword resolution failed; using raw topic");
            raw_topic.to_string()
        }
    }
}
