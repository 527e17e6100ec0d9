use std::sync::Arc;

use axum::{
    Router,
    extract::{MatchedPath, State},
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::error;

use crate::{
    application::{
        catalog::DocumentCatalog,
        error::{ErrorReport, HttpError},
        render::{RenderError, RenderService},
    },
    infra::assets,
    presentation::views::{
        LayoutChrome, LayoutContext, PageTemplate, PageView, render_not_found_response,
        render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub renderer: Arc<dyn RenderService>,
    pub catalog: Arc<DocumentCatalog>,
    pub syntax_css: Arc<str>,
}

/// One GET route per catalogued document, the embedded static bundle, and a 404 fallback.
pub fn build_router(state: HttpState) -> Router {
    let mut router = Router::new();

    for route in state.catalog.routes() {
        router = router.route(&route.path, get(document));
    }

    router
        .route("/static/syntax.css", get(syntax_css))
        .route("/static/{*path}", get(assets::serve_static))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn document(State(state): State<HttpState>, matched: MatchedPath) -> Response {
    let Some(route) = state.catalog.find(matched.as_str()).cloned() else {
        let chrome = LayoutChrome::from_catalog(&state.catalog, Some(matched.as_str()));
        return render_not_found_response(chrome);
    };

    let chrome = LayoutChrome::from_catalog(&state.catalog, Some(route.path.as_str()));

    let renderer = Arc::clone(&state.renderer);
    let template = route.template.clone();
    let context = route.context();
    let outcome =
        tokio::task::spawn_blocking(move || renderer.render_page(&template, &context)).await;

    match outcome {
        Ok(Ok(page)) => {
            let view = LayoutContext::new(chrome, PageView::new(route.title.as_str(), page));
            render_template_response(PageTemplate { view }, StatusCode::OK)
        }
        Ok(Err(err)) if err.is_not_found() => {
            let mut response = render_not_found_response(chrome);
            ErrorReport::from_error("infra::http::public::document", StatusCode::NOT_FOUND, &err)
                .attach(&mut response);
            response
        }
        Ok(Err(err)) => render_error_response(err),
        Err(join_err) => {
            error!(
                target = "anaconda::http::document",
                document = %route.template,
                error = %join_err,
                "render task failed"
            );
            HttpError::from_error(
                "infra::http::public::document",
                StatusCode::INTERNAL_SERVER_ERROR,
                "Document could not be rendered",
                &join_err,
            )
            .into_response()
        }
    }
}

fn render_error_response(err: RenderError) -> Response {
    HttpError::from(err).into_response()
}

async fn syntax_css(State(state): State<HttpState>) -> Response {
    assets::text_asset_response(&state.syntax_css, mime_guess::mime::TEXT_CSS_UTF_8)
}

async fn fallback(State(state): State<HttpState>, uri: Uri) -> Response {
    let chrome = LayoutChrome::from_catalog(&state.catalog, Some(uri.path()));
    render_not_found_response(chrome)
}
