//! Command-line interface definitions for PRISM News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! API keys can be provided via command-line flags or environment variables.

use crate::models::{Intensity, Settings};
use clap::Parser;

/// Command-line arguments for the PRISM News application.
///
/// # Examples
///
/// ```sh
/// # Analyze a topic with default settings (USA, standard tone)
/// prism_news "AI Safety Bill"
///
/// # Regional search with a harsher critic
/// prism_news "tvk rally" --region India --intensity ruthless
///
/// # Offline demo data, JSON on stdout
/// prism_news bitcoin --demo --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topic to analyze
    pub topic: String,

    /// Region to scope the news search to (e.g. USA, UK, India, Global)
    #[arg(short, long, default_value = "USA")]
    pub region: String,

    /// How critical the critic section should be
    #[arg(short, long, value_enum, default_value_t = Intensity::Standard)]
    pub intensity: Intensity,

    /// Use offline demo data instead of calling any API
    #[arg(long)]
    pub demo: bool,

    /// Print the result as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// GNews API key
    #[arg(long, env = "GNEWS_API_KEY", hide_env_values = true)]
    pub gnews_api_key: Option<String>,

    /// Google generative-language API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Also write the result as JSON under this directory
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Also write the result as Markdown under this directory
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,
}

impl Cli {
    /// Per-request settings derived from the arguments.
    pub fn settings(&self) -> Settings {
        Settings {
            region: self.region.clone(),
            intensity: self.intensity,
            demo_mode: self.demo,
        }
    }
}
