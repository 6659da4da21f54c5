//! Three-perspective analysis of fetched article text.

use crate::api::LanguageModel;
use crate::models::{Analysis, Intensity};
use crate::utils::{looks_truncated, strip_code_fences, truncate_for_log};
use tracing::{info, instrument, warn};

/// Tone instruction for the critic section.
pub fn tone_directive(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Standard => {
            "Keep a neutral, balanced tone; present the critic's concerns fairly without exaggeration."
        }
        Intensity::Skeptical => {
            "Be highly critical: question every claim and foreground the risks and downsides."
        }
        Intensity::Ruthless => {
            "Expose every weakness: treat the critic section as an unsparing takedown of the topic's flaws."
        }
    }
}

/// Build the analysis prompt.
pub fn synthesis_prompt(query: &str, article_text: &str, intensity: Intensity) -> String {
    let tone = tone_directive(intensity);
    format!(
        r#"Analyze this news about '{query}'.
Tone for the CRITIC section: {tone}
Strictly split the response into 3 sections: CRITIC (Negative), FACTS (Neutral), PROPONENT (Positive).
Return ONLY valid JSON in this format:
{{
    "topic": "{query}",
    "critic": {{ "title": "Main Concern", "points": ["point 1", "point 2", "point 3"] }},
    "facts": {{ "title": "Key Data", "points": ["stat 1", "stat 2", "stat 3"] }},
    "proponent": {{ "title": "Main Benefit", "points": ["point 1", "point 2", "point 3"] }}
}}

News Text:
{article_text}
"#
    )
}

/// Parse a model reply into an [`Analysis`], tolerating code fences.
///
/// Any missing or mistyped field yields `None`.
pub fn parse_analysis(reply: &str) -> Option<Analysis> {
    let cleaned = strip_code_fences(reply);
    match serde_json::from_str::<Analysis>(&cleaned) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            warn!(
                error = %e,
                truncated = looks_truncated(&e),
                reply = %truncate_for_log(&cleaned, 300),
                "Model returned non-conforming JSON"
            );
            None
        }
    }
}

/// Ask the model for an analysis of `article_text`.
#[instrument(level = "info", skip(model, article_text), fields(text_bytes = article_text.len()))]
pub async fn synthesize<M: LanguageModel>(
    model: &M,
    query: &str,
    article_text: &str,
    intensity: Intensity,
) -> Option<Analysis> {
    let prompt = synthesis_prompt(query, article_text, intensity);
    match model.generate(&prompt).await {
        Ok(reply) => {
            let analysis = parse_analysis(&reply)?;
            info!(topic = %analysis.topic, "Synthesized analysis");
            Some(analysis)
        }
        Err(e) => {
            warn!(error = %e, "Analysis request failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::pipeline::testing::{ANALYSIS_JSON, ScriptedModel};

    #[test]
    fn test_fenced_and_plain_parse_identically() {
        let fenced = format!("```json\n{ANALYSIS_JSON}\n```");
        let plain = parse_analysis(ANALYSIS_JSON).unwrap();
        assert_eq!(parse_analysis(&fenced).unwrap(), plain);
        assert_eq!(plain.critic.points.len(), 3);
    }

    #[test]
    fn test_missing_proponent_is_none() {
        let reply = r#"{
            "topic": "EU AI Act",
            "critic": { "title": "c", "points": ["a", "b", "c"] },
            "facts": { "title": "f", "points": ["a", "b", "c"] }
        }"#;
        assert_eq!(parse_analysis(reply), None);
    }

    #[test]
    fn test_malformed_points_is_none() {
        let reply = ANALYSIS_JSON.replace(r#"["Safer models", "Clear rules", "Consumer rights"]"#, r#""Safer models""#);
        assert_eq!(parse_analysis(&reply), None);
        assert_eq!(parse_analysis("Sorry, I cannot help with that."), None);
    }

    #[test]
    fn test_model_topic_is_trusted() {
        let analysis = parse_analysis(ANALYSIS_JSON).unwrap();
        assert_eq!(analysis.topic, "EU AI Act");
    }

    #[test]
    fn test_intensity_only_changes_tone_line() {
        let standard = synthesis_prompt("AI Act", "Source: AP. Title: t. Summary: s", Intensity::Standard);
        let ruthless = synthesis_prompt("AI Act", "Source: AP. Title: t. Summary: s", Intensity::Ruthless);

        let differing: Vec<(&str, &str)> = standard
            .lines()
            .zip(ruthless.lines())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(standard.lines().count(), ruthless.lines().count());
        assert_eq!(differing.len(), 1);
        assert!(differing[0].1.contains("Expose every weakness"));
        assert!(differing[0].0.contains("neutral"));
    }

    #[test]
    fn test_skeptical_directive() {
        assert!(tone_directive(Intensity::Skeptical).starts_with("Be highly critical"));
    }

    #[tokio::test]
    async fn test_synthesize_success_embeds_query_and_text() {
        let model = ScriptedModel::new(vec![Ok(format!("```json{ANALYSIS_JSON}```"))]);
        let analysis = synthesize(&model, "AI Act", "ARTICLE BODY", Intensity::Skeptical)
            .await
            .unwrap();
        assert_eq!(analysis.facts.title, "Status");

        let prompts = model.prompts();
        assert!(prompts[0].contains("'AI Act'"));
        assert!(prompts[0].contains("ARTICLE BODY"));
        assert!(prompts[0].contains("Be highly critical"));
    }

    #[tokio::test]
    async fn test_synthesize_non_200_is_none() {
        let model = ScriptedModel::new(vec![Err(ApiError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })]);
        assert_eq!(synthesize(&model, "q", "text", Intensity::Standard).await, None);
    }
}
