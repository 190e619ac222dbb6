use serde_json::Value;

use super::{Headers, StatusCode, Version};
use crate::gateway::StartResponse;

/// Response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
    /// Structured value, serialized to JSON on the way out.
    Json(Value),
}

impl Body {
    /// Exact bytes that go on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Body::Text(text) => text.as_bytes().to_vec(),
            Body::Bytes(bytes) => bytes.clone(),
            Body::Json(value) => value.to_string().into_bytes(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Body::Text(text) => text.is_empty(),
            Body::Bytes(bytes) => bytes.is_empty(),
            Body::Json(_) => false,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Text(String::new())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub version: Version,
    pub status: StatusCode,
    pub headers: Headers,
    pub body: Body,
}

impl Response {
    /// Creates an empty `text/html` response with the given status.
    pub fn new(status: impl Into<StatusCode>) -> Response {
        let mut headers = Headers::new();
        headers.set("Content-Type", "text/html");

        Response {
            version: Version::HTTP1_1,
            status: status.into(),
            headers,
            body: Body::default(),
        }
    }

    pub fn text(status: impl Into<StatusCode>, body: impl Into<String>) -> Response {
        let mut response = Response::new(status);
        response.set_content_type("text/plain");
        response.set_body(Body::Text(body.into()));
        response
    }

    pub fn html(status: impl Into<StatusCode>, body: impl Into<String>) -> Response {
        Response::new(status).with_body(Body::Text(body.into()))
    }

    /// A response whose body is serialized as JSON, with a matching
    /// `Content-Type`.
    pub fn json(status: impl Into<StatusCode>, value: Value) -> Response {
        let mut response = Response::new(status);
        response.set_content_type("application/json");
        response.set_body(Body::Json(value));
        response
    }

    /// Status-line-only error responses used by the router and server.
    pub(crate) fn error(status: StatusCode) -> Response {
        Response::text(status, status.status_line())
    }

    pub fn with_status(mut self, status: impl Into<StatusCode>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.set_body(body.into());
        self
    }

    /// Adds a header. `Content-Type` replaces any existing one.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.eq_ignore_ascii_case("content-type") {
            self.headers.set(name, value);
        } else {
            self.headers.append(name, value);
        }
    }

    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }

    pub fn set_content_type(&mut self, content_type: &str) {
        self.headers.set("Content-Type", content_type);
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }

    /// Serializes status line, headers and body.
    ///
    /// `Content-Length` is always computed from the encoded body; a
    /// caller-supplied one is dropped. `Date` and `Connection: close` are
    /// added unless already present.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body.to_bytes();
        let mut response = Vec::with_capacity(body.len() + 256);

        // Responses are always framed as HTTP/1.1
        let status_line = format!("{} {}\r\n", Version::HTTP1_1, self.status.status_line());
        response.extend_from_slice(status_line.as_bytes());

        for (key, value) in self.headers.iter() {
            if key.eq_ignore_ascii_case("content-length") {
                continue;
            }
            response.extend_from_slice(format!("{}: {}\r\n", key, value).as_bytes());
        }
        response.extend_from_slice(format!("Content-Length: {}\r\n", body.len()).as_bytes());
        if !self.headers.contains("Date") {
            let date = chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S GMT");
            response.extend_from_slice(format!("Date: {}\r\n", date).as_bytes());
        }
        if !self.headers.contains("Connection") {
            response.extend_from_slice(b"Connection: close\r\n");
        }

        response.extend_from_slice(b"\r\n");
        response.extend_from_slice(&body);

        response
    }

    /// Hands status and headers to `start_response` and returns the body as
    /// the chunk list a gateway application yields.
    pub fn into_gateway(self, start_response: &mut StartResponse<'_>) -> Vec<Vec<u8>> {
        let body = self.body.to_bytes();
        start_response(self.status.status_line(), self.headers.into());
        vec![body]
    }
}
