//! Markdown rendering of an analysis as three cards.

use crate::models::{Analysis, Section};
use crate::pipeline::Outcome;
use chrono::{DateTime, Local};
use std::fmt::Write;

fn write_card(md: &mut String, heading: &str, section: &Section) {
    writeln!(md, "## {heading}\n").unwrap();
    writeln!(md, "**{}**\n", section.title).unwrap();
    for point in &section.points {
        writeln!(md, "- {point}").unwrap();
    }
    md.push('\n');
}

/// Render an analysis as Markdown: Concerns, Key Data, Benefits.
pub fn analysis_to_markdown(analysis: &Analysis) -> String {
    let mut md = String::new();
    writeln!(md, "# Analysis for: {}\n", analysis.topic).unwrap();
    write_card(&mut md, "🛑 Concerns", &analysis.critic);
    write_card(&mut md, "⚖️ Key Data", &analysis.facts);
    write_card(&mut md, "✅ Benefits", &analysis.proponent);
    md
}

/// Render a full outcome, including the footer naming query and model.
///
/// Errors render as a single blockquote line.
pub fn outcome_to_markdown(outcome: &Outcome, generated_at: DateTime<Local>) -> String {
    let mut md = match &outcome.result {
        Ok(analysis) => analysis_to_markdown(analysis),
        Err(e) => format!("> **Error:** {e}\n\n"),
    };

    let query = outcome.context.query_used.as_deref().unwrap_or("n/a");
    let model = outcome
        .context
        .model_name
        .as_deref()
        .unwrap_or("offline demo data");
    writeln!(
        md,
        "---\n\n<small>Query: `{}` · Model: `{}` · Generated {}</small>",
        query,
        model,
        generated_at.format("%Y-%m-%d %H:%M")
    )
    .unwrap();
    md
}
