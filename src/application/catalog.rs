//! The set of documents served by the site and the paths they answer on.

use crate::application::templates::TemplateContext;

/// A routable Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRoute {
    /// Request path, e.g. `/functions`.
    pub path: String,
    /// Template name relative to the content directory.
    pub template: String,
    /// Label used for the page title and the site-wide links.
    pub title: String,
}

impl DocumentRoute {
    pub fn new(
        path: impl Into<String>,
        template: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            template: template.into(),
            title: title.into(),
        }
    }

    /// Template context handed to the renderer for this route.
    pub fn context(&self) -> TemplateContext {
        TemplateContext::for_document(&self.template)
            .with("path", self.path.as_str())
            .with("title", self.title.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCatalog {
    routes: Vec<DocumentRoute>,
}

impl DocumentCatalog {
    pub fn new(routes: Vec<DocumentRoute>) -> Self {
        Self { routes }
    }

    /// The Python reference documentation shipped in `content/python_doc`.
    pub fn python_docs() -> Self {
        Self::new(vec![
            DocumentRoute::new("/", "python_doc/overview.md", "Overview"),
            DocumentRoute::new("/functions", "python_doc/functions.md", "Functions"),
            DocumentRoute::new("/syntax", "python_doc/syntax.md", "Syntax"),
        ])
    }

    pub fn routes(&self) -> &[DocumentRoute] {
        &self.routes
    }

    pub fn find(&self, path: &str) -> Option<&DocumentRoute> {
        self.routes.iter().find(|route| route.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_docs_cover_the_reference_pages() {
        let catalog = DocumentCatalog::python_docs();
        let paths: Vec<&str> = catalog.routes().iter().map(|r| r.path.as_str()).collect();

        assert_eq!(paths, vec!["/", "/functions", "/syntax"]);
        assert_eq!(
            catalog.find("/syntax").map(|r| r.template.as_str()),
            Some("python_doc/syntax.md")
        );
        assert!(catalog.find("/missing").is_none());
    }

    #[test]
    fn route_context_names_the_document() {
        let route = DocumentRoute::new("/functions", "python_doc/functions.md", "Functions");
        let context = serde_json::to_value(route.context()).expect("context serializes");

        assert_eq!(
            context,
            serde_json::json!({
                "document": "python_doc/functions.md",
                "path": "/functions",
                "title": "Functions",
            })
        );
    }
}
