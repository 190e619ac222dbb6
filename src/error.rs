use std::io;

use thiserror::Error;

use crate::http::{Method, Response, StatusCode};

/// Failure to turn bytes from a socket into a request.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("request head exceeds {limit} bytes")]
    HeadersTooLarge { limit: usize },
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("declared body of {declared} bytes exceeds limit of {limit}")]
    PayloadTooLarge { declared: usize, limit: usize },
    #[error("body truncated: expected {expected} bytes, got {received}")]
    TruncatedBody { expected: usize, received: usize },
    #[error("connection closed before the request head was complete")]
    IncompleteHead,
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Status to answer with, or `None` when the connection should simply be
    /// dropped.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ParseError::PayloadTooLarge { .. } => Some(StatusCode::PAYLOAD_TOO_LARGE),
            ParseError::Io(_) => None,
            _ => Some(StatusCode::BAD_REQUEST),
        }
    }
}

/// Rejected route registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("a static route for {0:?} is already registered")]
    DuplicateRoute(String),
    #[error("invalid path template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
}

/// Fatal server faults. Per-connection failures never surface here.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("server socket is not initialized; call start() first")]
    NotStarted,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Why a request produced no handler response. Ordinary outcomes of
/// routing, not faults of the router.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route matches the path")]
    NotFound,
    #[error("method not allowed; route accepts {allowed:?}")]
    MethodNotAllowed { allowed: Vec<Method> },
    #[error("handler failed: {0}")]
    Handler(String),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NotFound => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            DispatchError::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response {
        let mut response = Response::error(self.status());
        if let DispatchError::MethodNotAllowed { allowed } = self {
            let allow: Vec<&str> = allowed.iter().map(Method::as_str).collect();
            response.add_header("Allow", allow.join(", "));
        }
        response
    }
}
