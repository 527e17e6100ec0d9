//! Embedded static asset serving.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::Mime;

use crate::application::error::ErrorReport;

static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Serve an embedded file from the `static/` bundle.
pub async fn serve_static(path: Option<Path<String>>) -> Response {
    let captured = path.map(|Path(value)| value);
    match resolve_asset(&STATIC_ASSETS, captured) {
        Some(asset) => asset.into_response(),
        None => not_found_response("infra::assets::serve_static"),
    }
}

/// Serve generated text with the same caching headers as embedded assets.
pub fn text_asset_response(contents: &str, mime: Mime) -> Response {
    build_response(Bytes::copy_from_slice(contents.as_bytes()), mime)
}

fn not_found_response(source: &'static str) -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    ErrorReport::from_message(source, StatusCode::NOT_FOUND, "Static asset not found")
        .attach(&mut response);
    response
}

struct Asset {
    contents: &'static [u8],
    mime: Mime,
}

fn resolve_asset(bundle: &'static Dir<'static>, path: Option<String>) -> Option<Asset> {
    let raw = path.unwrap_or_default();
    let candidate = raw.trim_start_matches('/');

    // No directory listings or traversal.
    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        return None;
    }

    let file = bundle.get_file(candidate)?;
    Some(Asset {
        contents: file.contents(),
        mime: mime_guess::from_path(candidate).first_or_octet_stream(),
    })
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        build_response(Bytes::from_static(self.contents), self.mime)
    }
}

fn build_response(bytes: Bytes, mime: Mime) -> Response {
    let len = bytes.len();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );

    response
}
