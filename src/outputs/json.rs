//! JSON output for API-style consumption.
//!
//! The file holds either the [`crate::models::Analysis`] object or
//! `{"error": "..."}`, exactly as [`Outcome::to_json`] produces it.

use crate::pipeline::Outcome;
use crate::utils::slugify_title;
use chrono::Local;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write an outcome to `{json_output_dir}/{date}/{slug}.json`.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_outcome(
    outcome: &Outcome,
    topic: &str,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&outcome.to_json())?;
    let date = Local::now().date_naive();
    let full_json_dir = format!("{}/{}", json_output_dir.trim_end_matches('/'), date);

    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = format!("{}/{}.json", full_json_dir, slugify_title(topic));
    fs::write(&path, json).await?;
    info!(%path, "Wrote JSON file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::demo_outcome;

    #[tokio::test]
    async fn test_write_outcome_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let outcome = demo_outcome("AI Regulation");

        let path = write_outcome(&outcome, "AI Regulation", dir).await.unwrap();
        assert!(path.ends_with("/ai-regulation.json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["topic"], "AI Regulation");
        assert_eq!(written["critic"]["points"].as_array().unwrap().len(), 3);
    }
}
