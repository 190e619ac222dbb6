//! The contract between the connection server and application code.
//!
//! The server builds an [`Environ`] for every request and calls a single
//! [`Application`] with it and a `start_response` callback. The application
//! reports status and headers through the callback and returns the body as
//! a list of byte chunks.

use std::{collections::BTreeMap, io::Cursor, net::SocketAddr};

use crate::{
    config::ServerConfig,
    http::{Headers, Request, Response, StatusCode, headers::canonical_name},
    router::Router,
};

/// Callback receiving the status line (`"200 OK"`) and response headers.
pub type StartResponse<'a> = dyn FnMut(String, Vec<(String, String)>) + 'a;

/// Per-request environment handed to an [`Application`].
#[derive(Debug)]
pub struct Environ {
    /// CGI-style variables: `REQUEST_METHOD`, `PATH_INFO`, `HTTP_*`, ...
    pub vars: BTreeMap<String, String>,
    pub request: Request,
    /// Request body as a readable stream.
    pub input: Cursor<Vec<u8>>,
}

impl Environ {
    pub fn new(request: Request, config: &ServerConfig, remote: Option<SocketAddr>) -> Environ {
        let mut vars = BTreeMap::new();
        vars.insert("REQUEST_METHOD".into(), request.method.to_string());
        vars.insert("PATH_INFO".into(), request.path.clone());
        vars.insert("QUERY_STRING".into(), request.query_string().to_string());
        vars.insert(
            "CONTENT_TYPE".into(),
            request.header("Content-Type").unwrap_or_default().to_string(),
        );
        vars.insert(
            "CONTENT_LENGTH".into(),
            request.header("Content-Length").unwrap_or_default().to_string(),
        );
        vars.insert("SERVER_NAME".into(), config.host.clone());
        vars.insert("SERVER_PORT".into(), config.port.to_string());
        vars.insert("SERVER_PROTOCOL".into(), request.version.to_string());
        if let Some(remote) = remote {
            vars.insert("REMOTE_ADDR".into(), remote.ip().to_string());
        }
        vars.insert("wsgi.version".into(), "1.0".into());
        vars.insert("wsgi.url_scheme".into(), "http".into());
        vars.insert("wsgi.multithread".into(), "true".into());
        vars.insert("wsgi.multiprocess".into(), "false".into());
        vars.insert("wsgi.run_once".into(), "false".into());

        for (name, value) in request.headers.iter() {
            let key = canonical_name(name);
            if key != "CONTENT_TYPE" && key != "CONTENT_LENGTH" {
                vars.insert(format!("HTTP_{key}"), value.to_string());
            }
        }

        let input = Cursor::new(request.body.clone());
        Environ {
            vars,
            request,
            input,
        }
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// The single entry point the server calls for every request.
pub trait Application: Send + Sync {
    fn call(&self, environ: &mut Environ, start_response: &mut StartResponse<'_>) -> Vec<Vec<u8>>;
}

/// An [`Application`] backed by a function.
pub struct AppFn<F> {
    f: F,
}

impl<F> Application for AppFn<F>
where
    F: Fn(&mut Environ, &mut StartResponse<'_>) -> Vec<Vec<u8>> + Send + Sync,
{
    fn call(&self, environ: &mut Environ, start_response: &mut StartResponse<'_>) -> Vec<Vec<u8>> {
        (self.f)(environ, start_response)
    }
}

/// Creates an [`Application`] from a function.
pub fn app_fn<F>(f: F) -> AppFn<F>
where
    F: Fn(&mut Environ, &mut StartResponse<'_>) -> Vec<Vec<u8>> + Send + Sync,
{
    AppFn { f }
}

/// Serves a [`Router`] through the gateway contract.
pub struct RouterApp {
    router: Router,
}

impl RouterApp {
    pub fn new(router: Router) -> Self {
        RouterApp { router }
    }
}

impl Application for RouterApp {
    fn call(&self, environ: &mut Environ, start_response: &mut StartResponse<'_>) -> Vec<Vec<u8>> {
        self.router
            .handle(&mut environ.request)
            .into_gateway(start_response)
    }
}

/// Rebuilds a response from what an application reported. `None` when the
/// status line carries no numeric code.
pub fn assemble_response(
    status_line: &str,
    headers: Vec<(String, String)>,
    chunks: Vec<Vec<u8>>,
) -> Option<Response> {
    let status = StatusCode::from_status_line(status_line)?;
    let mut response = Response::new(status).with_body(chunks.concat());
    response.headers = Headers::new();
    for (name, value) in headers {
        response.add_header(name, value);
    }
    Some(response)
}
