//! Template expansion of Markdown documents before they reach the renderer.
//!
//! Documents are Jinja-flavoured Markdown files resolved by name relative to
//! the content directory (`python_doc/overview.md`). Expansion is the first
//! pipeline stage and the only one that can report a missing document.

use std::path::PathBuf;

use minijinja::{Environment, ErrorKind, path_loader};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template `{name}` not found")]
    NotFound { name: String },
    #[error("template `{name}` failed to render: {message}")]
    Render { name: String, message: String },
}

impl TemplateError {
    fn from_minijinja(name: &str, error: minijinja::Error) -> Self {
        match error.kind() {
            ErrorKind::TemplateNotFound => Self::NotFound {
                name: name.to_string(),
            },
            _ => Self::Render {
                name: name.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Named substitution values made available to a document while it expands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext {
    values: Map<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-populated with the `document` name being rendered.
    pub fn for_document(name: &str) -> Self {
        Self::new().with("document", name)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }
}

/// Turns a named document plus context into Markdown source.
pub trait TemplateExpander: Send + Sync {
    fn expand(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError>;
}

/// minijinja-backed expander. Templates ending in `.md` are not auto-escaped.
#[derive(Debug)]
pub struct MiniJinjaExpander {
    env: Environment<'static>,
}

impl MiniJinjaExpander {
    /// Expander loading documents lazily from `root`.
    pub fn from_directory(root: impl Into<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(root.into()));
        Self { env }
    }

    /// Expander over a fixed set of in-memory documents.
    pub fn from_sources<I, N, S>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = Environment::new();
        for (name, source) in sources {
            let name = name.into();
            env.add_template_owned(name.clone(), source.into())
                .map_err(|err| TemplateError::from_minijinja(&name, err))?;
        }
        Ok(Self { env })
    }
}

impl TemplateExpander for MiniJinjaExpander {
    fn expand(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|err| TemplateError::from_minijinja(name, err))?;
        template
            .render(context)
            .map_err(|err| TemplateError::from_minijinja(name, err))
    }
}
