use std::time::Instant;

use tracing::info;

use crate::gateway::{Application, Environ, StartResponse};

/// A trait representing a layer that wraps an application.
pub trait Layer<A> {
    /// The type of application produced by the layer.
    type Application;

    /// Wraps the given application with the layer.
    fn layer(&self, inner: A) -> Self::Application;
}

/// A builder for stacking layers around an application. The layer added
/// last sees the request first.
pub struct AppBuilder<A> {
    app: A,
}

impl<A> AppBuilder<A> {
    /// Creates a new `AppBuilder` around the innermost application.
    pub fn new(app: A) -> Self {
        AppBuilder { app }
    }

    /// Adds a layer to the application.
    ///
    /// # Arguments
    ///
    /// * `layer` - The layer to be added.
    ///
    /// # Returns
    ///
    /// A new `AppBuilder` with the layer applied.
    pub fn layer<L>(self, layer: L) -> AppBuilder<L::Application>
    where
        L: Layer<A>,
    {
        AppBuilder {
            app: layer.layer(self.app),
        }
    }

    pub fn build(self) -> A {
        self.app
    }
}

/// Middleware to log requests
pub struct LogLayer;

impl<A> Layer<A> for LogLayer {
    type Application = LogMiddleware<A>;

    fn layer(&self, inner: A) -> Self::Application {
        LogMiddleware { inner }
    }
}

/// Logs method and path of each request and the status the wrapped
/// application answered with.
pub struct LogMiddleware<A> {
    inner: A,
}

impl<A: Application> Application for LogMiddleware<A> {
    fn call(&self, environ: &mut Environ, start_response: &mut StartResponse<'_>) -> Vec<Vec<u8>> {
        let method = environ.var("REQUEST_METHOD").unwrap_or("-").to_string();
        let path = environ.var("PATH_INFO").unwrap_or("-").to_string();
        info!(%method, %path, "request");

        let started = Instant::now();
        let mut status = None;
        let body = self.inner.call(environ, &mut |line: String, headers| {
            status = Some(line.clone());
            start_response(line, headers);
        });

        info!(
            %method,
            %path,
            status = status.as_deref().unwrap_or("Unknown"),
            elapsed_us = started.elapsed().as_micros() as u64,
            "response"
        );
        body
    }
}
