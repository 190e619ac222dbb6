use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use super::{Headers, Method, Version};
use crate::router::{ParamValue, PathParams};

/// A parsed request.
///
/// Everything except `path_params` is fixed at construction. The router
/// fills `path_params` after a pattern match; before that it is empty.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Request path without the query component.
    pub path: String,
    pub version: Version,
    pub headers: Headers,
    pub body: Vec<u8>,
    query_string: String,
    query_params: HashMap<String, String>,
    path_params: PathParams,
    data: Option<Value>,
}

impl Request {
    /// Builds a request from its parts. `target` may carry a query string,
    /// which is split off and parsed once here. A JSON body is decoded when
    /// the content type says so; a body that fails to decode leaves
    /// [`json`](Self::json) empty.
    pub fn new(
        method: Method,
        target: &str,
        version: Version,
        headers: Headers,
        body: Vec<u8>,
    ) -> Request {
        let (path, query_string) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (target.to_string(), String::new()),
        };
        let query_params = parse_query(&query_string);
        let data = decode_json_body(&headers, &body);

        Request {
            method,
            path,
            version,
            headers,
            body,
            query_string,
            query_params,
            path_params: PathParams::new(),
            data,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    pub fn path_param(&self, key: &str) -> Option<&ParamValue> {
        self.path_params.get(key)
    }

    pub(crate) fn set_path_params(&mut self, params: PathParams) {
        self.path_params = params;
    }

    /// Body decoded at construction, present only for JSON requests.
    pub fn json(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Decodes the body as JSON whatever its content type, falling back to
    /// an empty object.
    pub fn parse_data(&self) -> Value {
        if self.body.is_empty() {
            return Value::Object(Default::default());
        }
        serde_json::from_slice(&self.body).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

fn decode_json_body(headers: &Headers, body: &[u8]) -> Option<Value> {
    let content_type = headers.get("Content-Type")?;
    if !content_type.to_ascii_lowercase().contains("application/json") {
        return None;
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("JSON parsing error: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(target: &str, headers: &[(&str, &str)], body: &[u8]) -> Request {
        Request::new(
            Method::Post,
            target,
            Version::HTTP1_1,
            headers.iter().copied().collect(),
            body.to_vec(),
        )
    }

    #[test]
    fn splits_query_from_path() {
        let req = request("/a/b?x=1&y=&flag&&z=a=b", &[], b"");
        assert_eq!(req.path, "/a/b");
        assert_eq!(req.query_string(), "x=1&y=&flag&&z=a=b");
        assert_eq!(req.query_param("x"), Some("1"));
        assert_eq!(req.query_param("y"), Some(""));
        assert_eq!(req.query_param("flag"), Some(""));
        assert_eq!(req.query_param("z"), Some("a=b"));
        assert_eq!(req.query_params().len(), 4);
    }

    #[test]
    fn path_params_start_empty() {
        let req = request("/user/42", &[], b"");
        assert!(req.path_params().is_empty());
        assert_eq!(req.path_param("id"), None);
    }

    #[test]
    fn json_only_for_json_content_type() {
        let body = br#"{"a": 1}"#;
        let json_req = request("/", &[("content-type", "Application/JSON; charset=utf-8")], body);
        assert_eq!(json_req.json(), Some(&json!({"a": 1})));

        let text_req = request("/", &[("Content-Type", "text/plain")], body);
        assert_eq!(text_req.json(), None);
        assert_eq!(text_req.parse_data(), json!({"a": 1}));
    }

    #[test]
    fn parse_data_falls_back_to_empty_object() {
        assert_eq!(request("/", &[], b"").parse_data(), json!({}));
        assert_eq!(request("/", &[], b"not json").parse_data(), json!({}));
    }
}
