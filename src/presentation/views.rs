use crate::{
    application::{
        catalog::DocumentCatalog,
        error::{ErrorReport, HttpError},
        render::RenderedPage,
    },
    domain::navigation,
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

const SITE_TITLE: &str = "Python Reference";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let view = LayoutContext::new(chrome, ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct SiteLinkView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

/// Site-wide header: brand plus one link per catalogued document.
#[derive(Clone)]
pub struct LayoutChrome {
    pub title: String,
    pub links: Vec<SiteLinkView>,
}

impl LayoutChrome {
    pub fn from_catalog(catalog: &DocumentCatalog, current_path: Option<&str>) -> Self {
        let links = catalog
            .routes()
            .iter()
            .map(|route| SiteLinkView {
                label: route.title.clone(),
                href: route.path.clone(),
                is_active: current_path == Some(route.path.as_str()),
            })
            .collect();

        Self {
            title: SITE_TITLE.to_string(),
            links,
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub site_title: String,
    pub links: Vec<SiteLinkView>,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            site_title: chrome.title,
            links: chrome.links,
            content,
        }
    }
}

/// One line of the rendered table of contents; `depth` starts at 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocItemView {
    pub label: String,
    pub href: String,
    pub depth: usize,
}

pub struct PageView {
    pub title: String,
    pub body_html: String,
    pub toc: Vec<TocItemView>,
}

impl PageView {
    pub fn new(title: impl Into<String>, page: RenderedPage) -> Self {
        let toc = navigation::flatten(&page.navigation)
            .into_iter()
            .map(|(depth, entry)| TocItemView {
                label: entry.label.clone(),
                href: entry.url.clone(),
                depth,
            })
            .collect();

        Self {
            title: title.into(),
            body_html: page.content,
            toc,
        }
    }

    pub fn has_toc(&self) -> bool {
        !self.toc.is_empty()
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub view: LayoutContext<PageView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist.".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::NavigationEntry;

    fn sample_page() -> RenderedPage {
        let mut install = NavigationEntry::new("Install", "install");
        install.children.push(NavigationEntry::new("Linux", "linux"));
        RenderedPage {
            content: "<h2 id=\"install\">Install</h2><h3 id=\"linux\">Linux</h3>".to_string(),
            navigation: vec![install],
        }
    }

    #[test]
    fn chrome_marks_the_current_document() {
        let chrome = LayoutChrome::from_catalog(&DocumentCatalog::python_docs(), Some("/syntax"));
        let active: Vec<&str> = chrome
            .links
            .iter()
            .filter(|link| link.is_active)
            .map(|link| link.href.as_str())
            .collect();
        assert_eq!(active, vec!["/syntax"]);
    }

    #[test]
    fn page_view_flattens_navigation_with_depth() {
        let view = PageView::new("Overview", sample_page());
        assert_eq!(
            view.toc,
            vec![
                TocItemView {
                    label: "Install".to_string(),
                    href: "#install".to_string(),
                    depth: 1,
                },
                TocItemView {
                    label: "Linux".to_string(),
                    href: "#linux".to_string(),
                    depth: 2,
                },
            ]
        );
    }

    #[test]
    fn page_template_embeds_rendered_html_unescaped() {
        let chrome = LayoutChrome::from_catalog(&DocumentCatalog::python_docs(), Some("/"));
        let view = LayoutContext::new(chrome, PageView::new("Overview", sample_page()));
        let html = PageTemplate { view }.render().expect("render");

        assert!(html.contains("<h2 id=\"install\">Install</h2>"));
        assert!(html.contains("href=\"#linux\""));
        assert!(html.contains("<title>Overview | Python Reference</title>"));
    }

    #[test]
    fn not_found_response_carries_report() {
        let chrome = LayoutChrome::from_catalog(&DocumentCatalog::python_docs(), None);
        let response = render_not_found_response(chrome);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}
