//! JSON response envelope shared by every endpoint.

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Number of items in `data`
    pub count: usize,
    /// Short description of the payload
    pub title: String,
    /// Request path and query
    pub url: String,
}

/// `{meta, data}` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Envelope metadata
    pub meta: Meta,
    /// Payload
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    /// Creates an envelope.
    pub fn new(count: usize, title: impl Into<String>, uri: &Uri, data: T) -> Self {
        Self {
            meta: Meta {
                count,
                title: title.into(),
                url: request_url(uri),
            },
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Page-level payload, keyed `books` for client compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData<T> {
    /// Story text, type tag or choices
    pub books: T,
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    /// What went wrong
    pub message: String,
}

/// An error rendered as an envelope with a non-200 status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    title: String,
    url: String,
    message: String,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(
        status: StatusCode,
        title: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            title: title.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// 400 for a request rejected before lookup.
    pub fn bad_request(title: impl Into<String>, uri: &Uri, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, title, request_url(uri), message)
    }

    /// 404 for a resource that does not exist.
    pub fn not_found(title: impl Into<String>, uri: &Uri, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, title, request_url(uri), message)
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, url = %self.url, message = %self.message, "Request failed");
        }
        let body = Envelope {
            meta: Meta {
                count: 1,
                title: self.title,
                url: self.url,
            },
            data: ErrorData {
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Path plus query of `uri`, as echoed in `meta.url`.
pub fn request_url(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
