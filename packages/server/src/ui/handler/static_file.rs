//! Static file handler (router fallback).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use crate::ui::state::AppState;

/// 読み込みに失敗した場合のレスポンス本文
pub const NOT_FOUND_BODY: &str = "Error 404: resource not found.";

/// `/` は index.html、それ以外は公開ディレクトリ配下のファイルを返す
///
/// GET と HEAD 以外のメソッドは 405。
pub async fn serve_static(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return method_not_allowed();
    }

    match state.static_files.load(uri.path()).await {
        Ok(file) => ([(header::CONTENT_TYPE, file.content_type)], file.contents).into_response(),
        Err(e) => {
            tracing::debug!("Static file not served for '{}': {}", uri.path(), e);
            not_found()
        }
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD")],
    )
        .into_response()
}
