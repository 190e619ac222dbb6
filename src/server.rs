use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::gateway::{Application, Environ, assemble_response};
use crate::http::parser::read_request;
use crate::http::{Request, Response, StatusCode};

/// Thread-per-connection HTTP/1.1 server.
///
/// Each accepted connection is served by its own detached thread which
/// reads one request, runs the application, writes one response and closes
/// the socket. No read timeout is applied: a client that never finishes its
/// request keeps its worker thread blocked.
pub struct Server<A> {
    config: Arc<ServerConfig>,
    app: Arc<A>,
    listener: Option<TcpListener>,
    running: Arc<AtomicBool>,
}

/// Stops a running [`Server`] from another thread.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    running: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Halts the accept loop. The listener is closed once the loop notices;
    /// connections already being served are left to finish or be abandoned.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            // Unblock the pending accept()
            if let Err(e) = TcpStream::connect(self.wake_addr) {
                debug!("wake-up connection failed: {}", e);
            }
        }
    }
}

impl<A> Server<A>
where
    A: Application + 'static,
{
    pub fn new(config: ServerConfig, app: A) -> Self {
        Server {
            config: Arc::new(config),
            app: Arc::new(app),
            listener: None,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Binds the listening socket. Failing to bind is fatal.
    pub fn start(&mut self) -> Result<SocketAddr, ServerError> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            addr: address.clone(),
            source,
        })?;
        let local_addr = listener.local_addr()?;

        self.listener = Some(listener);
        self.running.store(true, Ordering::SeqCst);
        info!("Server running on http://{}", local_addr);
        Ok(local_addr)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    pub fn shutdown_handle(&self) -> Result<ShutdownHandle, ServerError> {
        let local_addr = self.local_addr().ok_or(ServerError::NotStarted)?;
        Ok(ShutdownHandle {
            running: self.running.clone(),
            wake_addr: wake_address(local_addr),
        })
    }

    /// Accepts connections until stopped. Each connection gets its own
    /// thread; accept errors are logged and skipped.
    pub fn serve_forever(&mut self) -> Result<(), ServerError> {
        let listener = self.listener.as_ref().ok_or(ServerError::NotStarted)?;
        let next_id = AtomicU64::new(0);

        for stream in listener.incoming() {
            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            match stream {
                Ok(stream) => {
                    let id = next_id.fetch_add(1, Ordering::Relaxed);
                    let app = Arc::clone(&self.app);
                    let config = Arc::clone(&self.config);

                    let spawned = thread::Builder::new()
                        .name(format!("conn-{id}"))
                        .spawn(move || handle_connection(stream, app.as_ref(), &config));
                    if let Err(e) = spawned {
                        error!("Failed to spawn connection worker: {}", e);
                    }
                }
                Err(e) => {
                    warn!("Connection failed: {}", e);
                }
            }
        }

        self.stop();
        Ok(())
    }

    /// Closes the listening socket.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if self.listener.take().is_some() {
            info!("Server stopped");
        }
    }

    /// Binds and serves until stopped.
    pub fn run(mut self) -> Result<(), ServerError> {
        self.start()?;
        self.serve_forever()
    }
}

fn wake_address(local_addr: SocketAddr) -> SocketAddr {
    match local_addr {
        SocketAddr::V4(addr) if addr.ip().is_unspecified() => {
            SocketAddr::from((Ipv4Addr::LOCALHOST, addr.port()))
        }
        SocketAddr::V6(addr) if addr.ip().is_unspecified() => {
            SocketAddr::from((Ipv6Addr::LOCALHOST, addr.port()))
        }
        addr => addr,
    }
}

/// Serves exactly one request on `stream`. The stream is dropped, and the
/// socket closed, on every path out of this function.
fn handle_connection<A: Application>(mut stream: TcpStream, app: &A, config: &ServerConfig) {
    let peer = stream.peer_addr().ok();

    let mut response = match read_request(&mut stream, config) {
        Ok(None) => {
            debug!(?peer, "peer closed without sending a request");
            return;
        }
        Ok(Some(request)) => run_application(app, request, config, peer),
        Err(e) => match e.status() {
            Some(status) => {
                warn!(?peer, "Failed to parse request: {}", e);
                Response::error(status)
            }
            None => {
                warn!(?peer, "Error reading from stream: {}", e);
                return;
            }
        },
    };

    if !response.headers.contains("Server") {
        response.add_header("Server", config.server_name.as_str());
    }
    if let Err(e) = stream
        .write_all(&response.to_bytes())
        .and_then(|_| stream.flush())
    {
        warn!(?peer, "Failed to send response: {}", e);
    }
}

/// Runs the application behind the gateway contract and turns what it
/// reported into a response. Panics and protocol violations become 500.
fn run_application<A: Application>(
    app: &A,
    request: Request,
    config: &ServerConfig,
    peer: Option<SocketAddr>,
) -> Response {
    let mut environ = Environ::new(request, config, peer);
    let mut reported = None;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        app.call(&mut environ, &mut |status, headers| {
            reported = Some((status, headers));
        })
    }));

    let chunks = match outcome {
        Ok(chunks) => chunks,
        Err(_) => {
            error!(?peer, "Application panicked while handling request");
            return Response::error(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let Some((status_line, headers)) = reported else {
        error!(?peer, "Application returned without calling start_response");
        return Response::error(StatusCode::INTERNAL_SERVER_ERROR);
    };

    assemble_response(&status_line, headers, chunks).unwrap_or_else(|| {
        error!(?peer, status_line = %status_line, "Application reported an invalid status line");
        Response::error(StatusCode::INTERNAL_SERVER_ERROR)
    })
}
