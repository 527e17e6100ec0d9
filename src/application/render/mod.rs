//! Markdown rendering pipeline.
//!
//! The pipeline is pure: a named document plus context goes in, deterministic
//! HTML and navigation come out, and failures surface as structured errors.
//! Stages run in order: template expansion, Markdown conversion (with code
//! highlighting), fragment parsing, heading anchoring, navigation extraction
//! and serialization.

mod fragment;
mod headings;
mod service;
mod types;

pub use fragment::HtmlFragment;
pub use headings::{assign_heading_ids, build_heading_tree};
pub use service::{MarkdownRenderer, RenderPipelineConfig};
pub use types::{RenderError, RenderService, RenderedPage};
