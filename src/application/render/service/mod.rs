mod config;
mod highlight;
mod rewrite;

use std::{sync::Arc, time::Instant};

use comrak::{Arena, format_html, nodes::AstNode, options::Options, parse_document};
use metrics::{counter, histogram};
use tracing::debug;

use crate::application::templates::{TemplateContext, TemplateExpander};
use crate::domain::headings::{AnchorPolicy, HeadingTags};

use super::fragment::HtmlFragment;
use super::headings::{assign_heading_ids, build_heading_tree};
use super::types::{RenderError, RenderService, RenderedPage};

use self::config::default_options;
use self::highlight::CodeHighlighter;
use self::rewrite::highlight_code_blocks;

/// Pipeline switches resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    pub highlight_code: bool,
    pub anchors: AnchorPolicy,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            highlight_code: true,
            anchors: AnchorPolicy::default(),
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderPipelineConfig {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        let tags = if settings.legacy_heading_tags {
            HeadingTags::Legacy
        } else {
            HeadingTags::Standard
        };

        Self {
            highlight_code: settings.highlight_code,
            anchors: AnchorPolicy::new(tags, settings.unique_anchors),
        }
    }
}

/// Comrak-based page renderer with Syntect highlighting and heading anchors.
///
/// Immutable once built; share it behind an `Arc` across requests.
pub struct MarkdownRenderer {
    templates: Arc<dyn TemplateExpander>,
    options: Options<'static>,
    highlighter: CodeHighlighter,
    config: RenderPipelineConfig,
}

impl MarkdownRenderer {
    pub fn new(templates: Arc<dyn TemplateExpander>, config: RenderPipelineConfig) -> Self {
        Self {
            templates,
            options: default_options(),
            highlighter: CodeHighlighter::new(),
            config,
        }
    }

    /// Expand, convert and anchor a document, returning the intermediate
    /// fragment before serialization.
    pub fn parse_markdown(
        &self,
        name: &str,
        context: &TemplateContext,
    ) -> Result<HtmlFragment, RenderError> {
        let source = self.templates.expand(name, context)?;
        let html = self.markdown_to_html(&source)?;
        let fragment = HtmlFragment::parse(&html)?;

        Ok(assign_heading_ids(fragment, &self.config.anchors))
    }

    /// Convert Markdown text to HTML, highlighting code blocks when enabled.
    pub fn markdown_to_html(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        if self.config.highlight_code {
            let rewritten = highlight_code_blocks(root, &self.highlighter)?;
            debug!(
                target = "application::render",
                code_blocks = rewritten,
                "highlighted code blocks"
            );
        }

        render_html_stage(root, &self.options)
    }

    /// Stylesheet matching the `syntax-` classes emitted by the highlighter.
    pub fn syntax_stylesheet(&self) -> Result<String, RenderError> {
        self.highlighter.stylesheet()
    }
}

impl RenderService for MarkdownRenderer {
    fn render_page(
        &self,
        name: &str,
        context: &TemplateContext,
    ) -> Result<RenderedPage, RenderError> {
        let started = Instant::now();
        let result = self.parse_markdown(name, context).and_then(|fragment| {
            let navigation = build_heading_tree(&fragment, self.config.anchors.tags);
            let content = fragment.to_html()?;
            Ok(RenderedPage {
                content,
                navigation,
            })
        });

        record_outcome(name, started, &result);
        result
    }

    fn render_markdown(
        &self,
        name: &str,
        context: &TemplateContext,
    ) -> Result<String, RenderError> {
        let started = Instant::now();
        let result = self
            .parse_markdown(name, context)
            .and_then(|fragment| fragment.to_html());

        record_outcome(name, started, &result);
        result
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

fn record_outcome<T>(name: &str, started: Instant, result: &Result<T, RenderError>) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let outcome = match result {
        Ok(_) => "ok",
        Err(RenderError::TemplateNotFound { .. }) => "not_found",
        Err(_) => "error",
    };

    counter!("anaconda_render_total", "outcome" => outcome).increment(1);
    histogram!("anaconda_render_ms").record(elapsed_ms);

    debug!(
        target = "application::render",
        document = name,
        outcome,
        elapsed_ms,
        "document rendered"
    );
}
