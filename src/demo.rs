//! Offline demo fixtures.
//!
//! Used when demo mode is on: no network calls, answers come from a small
//! fixed table keyed by substrings of the lower-cased topic.
//!
//! | Topic contains | Fixture |
//! |----------------|---------|
//! | `ai` | AI Regulation |
//! | `crypto` or `bitcoin` | Crypto Regulation |
//! | anything else | AI Regulation (default entry) |
//!
//! The `ai` check runs first and is a plain substring test, so words such
//! as "Spain" or "again" also select the AI fixture.

use crate::models::{Analysis, Section};
use tracing::{info, instrument};

fn section(title: &str, points: [&str; 3]) -> Section {
    Section {
        title: title.to_string(),
        points: points.iter().map(|p| p.to_string()).collect(),
    }
}

/// The AI Regulation fixture, also the default for unmatched topics.
pub fn ai_regulation() -> Analysis {
    Analysis {
        topic: "AI Regulation".to_string(),
        critic: section(
            "Stifling Innovation",
            [
                "Strict rules may slow down technological progress.",
                "Small startups cannot afford compliance costs.",
                "Other countries might overtake us in AI development.",
            ],
        ),
        facts: section(
            "Global Policy Status",
            [
                "EU AI Act is the world's first comprehensive AI law.",
                "US Executive Order requires safety testing for models.",
                "China has implemented strict algorithm registry rules.",
            ],
        ),
        proponent: section(
            "Safety & Ethics",
            [
                "Prevents deepfakes and misinformation spread.",
                "Protects user privacy and data rights.",
                "Ensures AI systems align with human values.",
            ],
        ),
    }
}

pub fn crypto_regulation() -> Analysis {
    Analysis {
        topic: "Crypto Regulation".to_string(),
        critic: section(
            "Financial Risk",
            [
                "High volatility puts investors at risk.",
                "Lack of consumer protection mechanism.",
                "Energy consumption concerns for mining.",
            ],
        ),
        facts: section(
            "Market Data",
            [
                "Bitcoin ETF approval increased institutional access.",
                "Total market cap fluctuates around $2 Trillion.",
                "El Salvador holds Bitcoin as legal tender.",
            ],
        ),
        proponent: section(
            "Decentralization",
            [
                "Removes reliance on central banks.",
                "Lowers cost of international transfers.",
                "Provides financial access to unbanked populations.",
            ],
        ),
    }
}

/// Look up the demo fixture for `topic`.
#[instrument(level = "info")]
pub fn demo_analysis(topic: &str) -> Analysis {
    let lower = topic.to_lowercase();
    let (key, analysis) = if lower.contains("ai") {
        ("ai", ai_regulation())
    } else if lower.contains("crypto") || lower.contains("bitcoin") {
        ("crypto", crypto_regulation())
    } else {
        // TODO: report "no demo fixture" instead of silently serving the AI entry.
        ("default", ai_regulation())
    };
    info!(fixture = key, "Serving demo fixture");
    analysis
}
