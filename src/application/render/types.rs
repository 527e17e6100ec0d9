use serde::Serialize;
use thiserror::Error;

use crate::application::templates::{TemplateContext, TemplateError};
use crate::domain::navigation::NavigationEntry;

/// Rendered document body plus the navigation derived from its headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// HTML fragment with heading ids assigned.
    pub content: String,
    /// Table-of-contents forest for `h2` and deeper headings.
    pub navigation: Vec<NavigationEntry>,
}

/// Structured errors surfaced by the rendering pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("template `{name}` not found")]
    TemplateNotFound { name: String },
    #[error("template expansion failed: {name}: {message}")]
    Template { name: String, message: String },
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error("syntax highlighting failed: {language}: {message}")]
    Highlighting { language: String, message: String },
    #[error("document processing failed: {message}")]
    Document { message: String },
}

impl RenderError {
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::TemplateNotFound { .. })
    }
}

impl From<TemplateError> for RenderError {
    fn from(error: TemplateError) -> Self {
        match error {
            TemplateError::NotFound { name } => RenderError::TemplateNotFound { name },
            TemplateError::Render { name, message } => RenderError::Template { name, message },
        }
    }
}

/// Renders named Markdown documents. Implementations must be deterministic:
/// the same document and context produce the same output or error.
pub trait RenderService: Send + Sync {
    /// Full render with navigation extracted from the document headings.
    fn render_page(
        &self,
        name: &str,
        context: &TemplateContext,
    ) -> Result<RenderedPage, RenderError>;

    /// Content-only render; headings still receive ids.
    fn render_markdown(&self, name: &str, context: &TemplateContext)
    -> Result<String, RenderError>;
}
