//! A small HTTP/1.1 stack on plain TCP sockets: a request parser, a path
//! router with typed placeholders, and a thread-per-connection server that
//! talks to application code through a gateway callback contract.
//!
//! One request is served per connection. Keep-alive, chunked transfer
//! encoding and TLS are not supported.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod middleware;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{DispatchError, ParseError, RouteError, ServerError};
pub use gateway::{Application, Environ, RouterApp, StartResponse, app_fn};
pub use http::{Body, Headers, Method, Request, Response, StatusCode};
pub use middleware::{AppBuilder, Layer, LogLayer};
pub use router::{HandlerResult, IntoResponse, ParamValue, PathParams, Reply, Router};
pub use server::{Server, ShutdownHandle};
