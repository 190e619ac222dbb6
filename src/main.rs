use std::{error::Error, io, thread};

use clap::Parser;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use plainhttp::{
    AppBuilder, LogLayer, Method, Reply, RouteError, Router, RouterApp, Server, ServerConfig,
    ShutdownHandle,
};

/// Serve the demo routes over plain HTTP/1.1.
#[derive(Parser, Debug)]
#[command(name = "runserver", version, about)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "PLAINHTTP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PLAINHTTP_PORT", default_value_t = 8000)]
    port: u16,

    /// Largest request body accepted, in bytes
    #[arg(long, default_value_t = 10 * 1024 * 1024)]
    max_body_bytes: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plainhttp=info,runserver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        max_body_bytes: cli.max_body_bytes,
        ..ServerConfig::new(cli.host, cli.port)
    };

    let app = AppBuilder::new(RouterApp::new(routes()?))
        .layer(LogLayer)
        .build();

    let mut server = Server::new(config, app);
    server.start()?;
    watch_for_interrupt(server.shutdown_handle()?)?;
    server.serve_forever()?;

    // Workers still running are detached and end with the process
    Ok(())
}

fn routes() -> Result<Router, RouteError> {
    let mut router = Router::new();

    router.get("/", |_, _| Ok(("Welcome to the home page!", 200).into()))?;
    router.get("/about", |_, _| Ok(("This is the about page.", 200).into()))?;
    router.get("/user/<int:id>", |_, params| {
        Ok(json!({ "id": params.get("id") }).into())
    })?;
    router.get("/hello/<name>", |req, params| {
        let greeting = req.query_param("greeting").unwrap_or("Hello");
        Ok(Reply::display(format!(
            "{}, {}!",
            greeting,
            params.get("name").map(ToString::to_string).unwrap_or_default()
        )))
    })?;
    router.register(
        "/echo",
        |req, _| match req.json() {
            Some(value) => Ok(value.clone().into()),
            None => Ok(("expected a JSON body", 400).into()),
        },
        &[Method::Post, Method::Put],
    )?;

    Ok(router)
}

/// Stops the server on Ctrl-C. Runs a single-threaded tokio runtime on a
/// helper thread just to await the signal.
fn watch_for_interrupt(handle: ShutdownHandle) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("signals".into())
        .spawn(move || match runtime.block_on(tokio::signal::ctrl_c()) {
            Ok(()) => {
                info!("Shutting down server gracefully...");
                handle.stop();
            }
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        })?;

    Ok(())
}
