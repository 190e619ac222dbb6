use std::{
    any::Any,
    collections::HashMap,
    fmt::Display,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, LazyLock},
};

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::{DispatchError, RouteError},
    http::{Body, Headers, Method, Request, Response, StatusCode},
};

/// A path parameter after type conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

pub type PathParams = HashMap<String, ParamValue>;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<Reply, HandlerError>;

/// Application code bound to a route. Receives the request (path parameters
/// already bound) and the same parameters again for direct lookup.
pub type Handler = Arc<dyn Fn(&Request, &PathParams) -> HandlerResult + Send + Sync>;

/// Values that know how to become a complete response on their own.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// What a handler hands back. Converted to a [`Response`] once, at the
/// dispatch boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A finished response, passed through untouched.
    Response(Response),
    /// Text body with status 200.
    Body(String),
    /// JSON body with status 200.
    Json(Value),
    Full {
        status: StatusCode,
        headers: Vec<(String, String)>,
        body: Body,
    },
}

impl Reply {
    /// Wraps a value that builds its own response.
    pub fn custom(value: impl IntoResponse) -> Reply {
        Reply::Response(value.into_response())
    }

    /// Stringifies any displayable value into a 200 body.
    pub fn display(value: impl Display) -> Reply {
        Reply::Body(value.to_string())
    }

    pub fn into_response(self) -> Response {
        match self {
            Reply::Response(response) => response,
            Reply::Body(text) => Response::html(StatusCode::OK, text),
            Reply::Json(value) => Response::json(StatusCode::OK, value),
            Reply::Full {
                status,
                headers,
                body,
            } => {
                let is_json = matches!(body, Body::Json(_));
                let mut response = Response::new(status).with_body(body);
                // Explicit headers replace the defaults entirely
                if headers.is_empty() {
                    if is_json {
                        response.set_content_type("application/json");
                    }
                } else {
                    response.headers = Headers::new();
                    for (name, value) in headers {
                        response.add_header(name, value);
                    }
                    if is_json && response.content_type().is_none() {
                        response.set_content_type("application/json");
                    }
                }
                response
            }
        }
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Reply::Response(response)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Body(text.to_string())
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Body(text)
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::Json(value)
    }
}

impl<B: Into<Body>> From<(B, u16)> for Reply {
    fn from((body, status): (B, u16)) -> Self {
        Reply::Full {
            status: StatusCode(status),
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

impl<B, K, V> From<(B, u16, Vec<(K, V)>)> for Reply
where
    B: Into<Body>,
    K: Into<String>,
    V: Into<String>,
{
    fn from((body, status, headers): (B, u16, Vec<(K, V)>)) -> Self {
        Reply::Full {
            status: StatusCode(status),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamType {
    Int,
    Float,
    Str,
}

impl ParamType {
    /// Unknown type names fall back to plain strings.
    fn from_name(name: Option<&str>) -> ParamType {
        match name {
            Some("int") => ParamType::Int,
            Some("float") => ParamType::Float,
            _ => ParamType::Str,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            // ASCII digits only; `\d` would accept any Unicode digit
            ParamType::Int => r"([0-9]+)",
            ParamType::Float => r"([0-9]+\.[0-9]+)",
            ParamType::Str => r"([^/]+)",
        }
    }

    /// Conversion failures keep the raw text.
    fn convert(self, raw: &str) -> ParamValue {
        match self {
            ParamType::Int => raw
                .parse()
                .map(ParamValue::Int)
                .unwrap_or_else(|_| ParamValue::Str(raw.to_string())),
            ParamType::Float => raw
                .parse()
                .map(ParamValue::Float)
                .unwrap_or_else(|_| ParamValue::Str(raw.to_string())),
            ParamType::Str => ParamValue::Str(raw.to_string()),
        }
    }
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:([A-Za-z_][A-Za-z0-9_]*):)?([A-Za-z_][A-Za-z0-9_]*)>")
        .expect("placeholder pattern is valid")
});

#[derive(Clone)]
struct Route {
    methods: Vec<Method>,
    handler: Handler,
}

#[derive(Clone)]
struct PatternRoute {
    template: String,
    matcher: Regex,
    params: Vec<(String, ParamType)>,
    route: Route,
}

/// Route table. Built before the server starts, then shared read-only
/// between connection workers.
#[derive(Clone, Default)]
pub struct Router {
    static_routes: HashMap<String, Route>,
    pattern_routes: Vec<PatternRoute>,
}

impl Router {
    pub fn new() -> Self {
        Router::default()
    }

    /// Adds a route. `path` is either a literal path or a template with
    /// `<name>` / `<type:name>` placeholders, where `type` is `int`, `float`
    /// or `string`. An empty `methods` list means GET only.
    pub fn register<H>(
        &mut self,
        path: &str,
        handler: H,
        methods: &[Method],
    ) -> Result<(), RouteError>
    where
        H: Fn(&Request, &PathParams) -> HandlerResult + Send + Sync + 'static,
    {
        let route = Route {
            methods: if methods.is_empty() {
                vec![Method::Get]
            } else {
                methods.to_vec()
            },
            handler: Arc::new(handler),
        };

        if path.contains('<') || path.contains('>') {
            let (matcher, params) = compile_template(path)?;
            debug!(template = path, matcher = matcher.as_str(), "registered pattern route");
            self.pattern_routes.push(PatternRoute {
                template: path.to_string(),
                matcher,
                params,
                route,
            });
            return Ok(());
        }

        if self.static_routes.contains_key(path) {
            return Err(RouteError::DuplicateRoute(path.to_string()));
        }
        debug!(path, "registered static route");
        self.static_routes.insert(path.to_string(), route);
        Ok(())
    }

    pub fn get<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &PathParams) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(path, handler, &[Method::Get])
    }

    pub fn post<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &PathParams) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(path, handler, &[Method::Post])
    }

    pub fn put<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &PathParams) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(path, handler, &[Method::Put])
    }

    pub fn patch<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &PathParams) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(path, handler, &[Method::Patch])
    }

    pub fn delete<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &PathParams) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(path, handler, &[Method::Delete])
    }

    /// Finds the handler for `method` + `path`.
    ///
    /// Static routes are checked first. Pattern routes are then tried in
    /// registration order and the first one whose template matches the path
    /// decides the outcome: if it does not accept `method` the result is
    /// `MethodNotAllowed`, even when a later pattern would have accepted it.
    pub fn resolve(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(&Handler, PathParams), DispatchError> {
        if let Some(route) = self.static_routes.get(path) {
            return route
                .accepting(method)
                .map(|handler| (handler, PathParams::new()));
        }

        for pattern in &self.pattern_routes {
            let Some(captures) = pattern.matcher.captures(path) else {
                continue;
            };
            debug!(template = %pattern.template, path, "pattern route matched");
            let handler = pattern.route.accepting(method)?;
            let params = pattern
                .params
                .iter()
                .zip(captures.iter().skip(1))
                .filter_map(|((name, kind), capture)| {
                    capture.map(|c| (name.clone(), kind.convert(c.as_str())))
                })
                .collect();
            return Ok((handler, params));
        }

        Err(DispatchError::NotFound)
    }

    /// Routes the request and runs its handler. 404, 405 and handler
    /// faults come back as `Err`.
    pub fn try_dispatch(
        &self,
        path: &str,
        request: &mut Request,
        method: Method,
    ) -> Result<Response, DispatchError> {
        debug!(%method, path, "dispatching");
        let (handler, params) = self.resolve(method, path)?;
        request.set_path_params(params);
        let request = &*request;

        match panic::catch_unwind(AssertUnwindSafe(|| handler(request, request.path_params()))) {
            Ok(Ok(reply)) => Ok(reply.into_response()),
            Ok(Err(e)) => Err(DispatchError::Handler(e.to_string())),
            Err(payload) => Err(DispatchError::Handler(panic_message(payload.as_ref()))),
        }
    }

    /// Like [`try_dispatch`](Self::try_dispatch), with every failure turned
    /// into its error response. Never panics on handler faults.
    pub fn dispatch(&self, path: &str, request: &mut Request, method: Method) -> Response {
        self.try_dispatch(path, request, method).unwrap_or_else(|e| {
            if let DispatchError::Handler(ref message) = e {
                error!(path, %method, "handler failed: {}", message);
            }
            e.into_response()
        })
    }

    /// Dispatches on the request's own path and method.
    pub fn handle(&self, request: &mut Request) -> Response {
        let path = request.path.clone();
        let method = request.method;
        self.dispatch(&path, request, method)
    }
}

impl Route {
    fn accepting(&self, method: Method) -> Result<&Handler, DispatchError> {
        if self.methods.contains(&method) {
            Ok(&self.handler)
        } else {
            Err(DispatchError::MethodNotAllowed {
                allowed: self.methods.clone(),
            })
        }
    }
}

fn compile_template(template: &str) -> Result<(Regex, Vec<(String, ParamType)>), RouteError> {
    let invalid = |reason: &str| RouteError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut pattern = String::from("^");
    let mut params: Vec<(String, ParamType)> = Vec::new();
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let literal = &template[last..whole.start()];
        if literal.contains(['<', '>']) {
            return Err(invalid("unbalanced or empty placeholder"));
        }
        pattern.push_str(&regex::escape(literal));

        let kind = ParamType::from_name(captures.get(1).map(|m| m.as_str()));
        let name = captures.get(2).map_or("", |m| m.as_str()).to_string();
        if params.iter().any(|(existing, _)| *existing == name) {
            return Err(invalid("placeholder name used twice"));
        }
        pattern.push_str(kind.pattern());
        params.push((name, kind));
        last = whole.end();
    }

    let tail = &template[last..];
    if tail.contains(['<', '>']) {
        return Err(invalid("unbalanced or empty placeholder"));
    }
    pattern.push_str(&regex::escape(tail));
    pattern.push('$');

    let matcher = Regex::new(&pattern).map_err(|e| invalid(&e.to_string()))?;
    Ok((matcher, params))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::http::Version;

    fn request(method: Method, target: &str) -> Request {
        Request::new(method, target, Version::HTTP1_1, Headers::new(), Vec::new())
    }

    fn body_text(response: &Response) -> String {
        String::from_utf8(response.body.to_bytes()).unwrap()
    }

    #[test]
    fn static_route_invokes_handler_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut router = Router::new();
        router
            .register(
                "/about",
                move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok("This is the about page.".into())
                },
                &[Method::Get, Method::Post],
            )
            .unwrap();

        let mut req = request(Method::Post, "/about");
        let response = router.dispatch("/about", &mut req, Method::Post);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(body_text(&response), "This is the about page.");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn static_route_wrong_method_is_405_without_calling_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut router = Router::new();
        router
            .get("/", move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("home".into())
            })
            .unwrap();

        let mut req = request(Method::Delete, "/");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers.get("Allow"), Some("GET"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_path_is_404_with_body() {
        let router = Router::new();
        let mut req = request(Method::Get, "/nowhere");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(!response.body.is_empty());
        assert!(matches!(
            router.resolve(Method::Get, "/nowhere"),
            Err(DispatchError::NotFound)
        ));
    }

    #[test]
    fn untyped_placeholder_binds_string() {
        let mut router = Router::new();
        router
            .get("/user/<id>", |req, params| {
                assert_eq!(req.path_param("id"), params.get("id"));
                Ok(Reply::display(params["id"].clone()))
            })
            .unwrap();

        let mut req = request(Method::Get, "/user/42");
        let response = router.handle(&mut req);
        assert_eq!(body_text(&response), "42");
        assert_eq!(
            req.path_param("id"),
            Some(&ParamValue::Str("42".to_string()))
        );
    }

    #[test]
    fn int_placeholder_binds_integer() {
        let mut router = Router::new();
        router
            .get("/item/<int:id>", |_, params| {
                let id = params["id"].as_int().ok_or("id should be an integer")?;
                Ok(json!({ "id": id + 1 }).into())
            })
            .unwrap();

        let mut req = request(Method::Get, "/item/42");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, Body::Json(json!({"id": 43})));
        assert_eq!(req.path_param("id"), Some(&ParamValue::Int(42)));
    }

    #[test]
    fn int_placeholder_does_not_match_letters() {
        let mut router = Router::new();
        router.get("/item/<int:id>", |_, _| Ok("item".into())).unwrap();

        let mut req = request(Method::Get, "/item/abc");
        assert_eq!(router.handle(&mut req).status, StatusCode::NOT_FOUND);
        assert!(req.path_params().is_empty());
    }

    #[test]
    fn typed_placeholders_only_match_ascii_digits() {
        let mut router = Router::new();
        router.get("/item/<int:id>", |_, _| Ok("item".into())).unwrap();
        router.get("/price/<float:amount>", |_, _| Ok("price".into())).unwrap();

        // Arabic-Indic four-two
        let mut req = request(Method::Get, "/item/\u{0664}\u{0662}");
        assert_eq!(router.handle(&mut req).status, StatusCode::NOT_FOUND);
        assert!(req.path_params().is_empty());
        assert!(matches!(
            router.resolve(Method::Get, "/price/\u{0661}.\u{0665}"),
            Err(DispatchError::NotFound)
        ));
        assert!(router.resolve(Method::Get, "/item/42").is_ok());
    }

    #[test]
    fn int_overflow_keeps_raw_string() {
        let mut router = Router::new();
        router.get("/item/<int:id>", |_, _| Ok("item".into())).unwrap();

        let huge = "99999999999999999999999";
        let (_, params) = router.resolve(Method::Get, &format!("/item/{huge}")).unwrap();
        assert_eq!(params["id"], ParamValue::Str(huge.to_string()));
    }

    #[test]
    fn float_and_multiple_placeholders() {
        let mut router = Router::new();
        router
            .get("/geo/<float:lat>/<float:lng>/<name>", |_, _| Ok("ok".into()))
            .unwrap();

        let (_, params) = router.resolve(Method::Get, "/geo/51.5/0.12/london").unwrap();
        assert_eq!(params["lat"], ParamValue::Float(51.5));
        assert_eq!(params["lng"], ParamValue::Float(0.12));
        assert_eq!(params["name"], ParamValue::Str("london".to_string()));

        assert!(router.resolve(Method::Get, "/geo/51/0.12/london").is_err());
    }

    #[test]
    fn pattern_match_is_anchored() {
        let mut router = Router::new();
        router.get("/user/<id>", |_, _| Ok("user".into())).unwrap();

        assert!(router.resolve(Method::Get, "/user/1/extra").is_err());
        assert!(router.resolve(Method::Get, "/api/user/1").is_err());
        assert!(router.resolve(Method::Get, "/user/").is_err());
    }

    #[test]
    fn template_literals_are_escaped() {
        let mut router = Router::new();
        router.get("/files/<name>.txt", |_, _| Ok("file".into())).unwrap();

        assert!(router.resolve(Method::Get, "/files/readme.txt").is_ok());
        assert!(router.resolve(Method::Get, "/files/readmeXtxt").is_err());
    }

    #[test]
    fn first_structural_pattern_match_wins() {
        let mut router = Router::new();
        router.get("/thing/<id>", |_, _| Ok("get".into())).unwrap();
        router
            .post("/thing/<int:id>", |_, _| Ok("post".into()))
            .unwrap();

        let mut req = request(Method::Post, "/thing/5");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

        let mut req = request(Method::Get, "/thing/5");
        assert_eq!(body_text(&router.handle(&mut req)), "get");
    }

    #[test]
    fn static_route_wins_over_pattern() {
        let mut router = Router::new();
        router.get("/user/<id>", |_, _| Ok("pattern".into())).unwrap();
        router.get("/user/me", |_, _| Ok("static".into())).unwrap();

        let mut req = request(Method::Get, "/user/me");
        assert_eq!(body_text(&router.handle(&mut req)), "static");
    }

    #[test]
    fn duplicate_static_route_is_rejected() {
        let mut router = Router::new();
        router.get("/", |_, _| Ok("a".into())).unwrap();
        assert_eq!(
            router.post("/", |_, _| Ok("b".into())),
            Err(RouteError::DuplicateRoute("/".to_string()))
        );
    }

    #[test]
    fn malformed_templates_are_rejected() {
        let mut router = Router::new();
        for template in ["/a/<id", "/a/<>", "/a/<int:>", "/a/<id>/<id>", "/a/id>"] {
            let result = router.get(template, |_, _| Ok("x".into()));
            assert!(
                matches!(result, Err(RouteError::InvalidTemplate { .. })),
                "{template} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_placeholder_type_is_a_string() {
        let mut router = Router::new();
        router.get("/tag/<slug:name>", |_, _| Ok("x".into())).unwrap();
        let (_, params) = router.resolve(Method::Get, "/tag/rust-lang").unwrap();
        assert_eq!(params["name"], ParamValue::Str("rust-lang".to_string()));
    }

    #[test]
    fn tuple_replies_set_status_and_headers() {
        let mut router = Router::new();
        router.get("/ok", |_, _| Ok(("ok", 200).into())).unwrap();
        router
            .get("/bad", |_, _| Ok(("bad", 400, vec![("X-Err", "1")]).into()))
            .unwrap();

        let mut req = request(Method::Get, "/ok");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(body_text(&response), "ok");

        let mut req = request(Method::Get, "/bad");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.headers.get("X-Err"), Some("1"));
        assert_eq!(body_text(&response), "bad");
    }

    #[test]
    fn reply_shapes_normalize() {
        assert_eq!(Reply::from("hi").into_response().status, StatusCode::OK);

        let response = Reply::from(json!([1, 2])).into_response();
        assert_eq!(response.content_type(), Some("application/json"));

        let response = Reply::display(3.5).into_response();
        assert_eq!(body_text(&response), "3.5");

        let prebuilt = Response::text(StatusCode::CREATED, "made");
        assert_eq!(Reply::custom(prebuilt.clone()).into_response(), prebuilt);

        let response = Reply::from((json!({"a": 1}), 201)).into_response();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn explicit_content_type_survives_json_body() {
        let reply = Reply::from((json!({"a": 1}), 200, vec![("Content-Type", "text/html")]));
        let response = reply.into_response();
        assert_eq!(response.content_type(), Some("text/html"));

        let response = Reply::from((json!({"a": 1}), 200, vec![("X-Extra", "1")])).into_response();
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.headers.get("X-Extra"), Some("1"));
    }

    #[test]
    fn handler_error_becomes_500() {
        let mut router = Router::new();
        router
            .get("/fail", |_, _| Err("database unavailable".into()))
            .unwrap();

        let mut req = request(Method::Get, "/fail");
        assert!(matches!(
            router.try_dispatch("/fail", &mut req, Method::Get),
            Err(DispatchError::Handler(ref m)) if m == "database unavailable"
        ));
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn handler_panic_becomes_500() {
        let mut router = Router::new();
        router
            .get("/boom", |_, _| -> HandlerResult { panic!("boom") })
            .unwrap();

        let mut req = request(Method::Get, "/boom");
        let response = router.handle(&mut req);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(&response), "500 Internal Server Error");
    }

    #[test]
    fn empty_method_list_means_get() {
        let mut router = Router::new();
        router.register("/", |_, _| Ok("home".into()), &[]).unwrap();
        assert!(router.resolve(Method::Get, "/").is_ok());
        assert!(router.resolve(Method::Post, "/").is_err());
    }
}
