//! Output generation for analysis results.
//!
//! # Submodules
//!
//! - [`json`]: Writes an [`crate::pipeline::Outcome`] as JSON
//! - [`markdown`]: Renders an outcome as three Markdown cards
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── ai-regulation.json
//!
//! markdown_output_dir/
//! └── 2025-05-06_ai-regulation.md
//! ```

pub mod json;
pub mod markdown;
