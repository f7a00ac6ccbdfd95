use std::net::SocketAddr;

use axum::{
    Form, Json,
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::error;

use alcove_core::{DEFAULT_PAGE_SIZE, Error, thread};
use alcove_types::{SubmitForm, SubmitRequest};

use crate::AppState;

const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

/// `GET /comments?url=...` — approved comments for the page, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let thread = match thread::from_url(&query.url) {
        Ok(thread) => thread,
        Err(err) => return error_response(err),
    };
    match state
        .comments
        .list(&thread, query.limit.min(MAX_PAGE_SIZE))
        .await
    {
        Ok(comments) => Json(comments).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /comments` — form submission from the embedded widget. On success,
/// sends the browser back to the page the comment was left on.
pub async fn submit_comment(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Response {
    let request = SubmitRequest {
        url: form.url,
        author: form.comment_author,
        author_email: form.comment_author_email,
        author_url: form.comment_author_url,
        content: form.comment_content,
        user_ip: client_ip(&headers, peer),
        user_agent: header_value(&headers, header::USER_AGENT),
        referrer: header_value(&headers, header::REFERER),
    };

    match state.comments.submit(request).await {
        Ok(submission) => Redirect::to(&submission.permalink).into_response(),
        Err(err) => error_response(err),
    }
}

/// Trust `X-Forwarded-For` when a proxy set it; otherwise the socket peer.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string())
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Validation failures carry their reason to the client; everything else is
/// logged and reported as an opaque backend error.
fn error_response(err: Error) -> Response {
    match err {
        Error::InvalidUrl(_)
        | Error::MissingHost
        | Error::MissingField(_)
        | Error::Disabled => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        other => {
            error!("{}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "backend error".to_string()).into_response()
        }
    }
}
