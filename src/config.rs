/// Settings for a [`Server`](crate::server::Server).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Size of each read from a client socket.
    pub read_buffer_bytes: usize,
    /// Upper bound on request line + headers.
    pub max_header_bytes: usize,
    /// Upper bound on a declared `Content-Length`.
    pub max_body_bytes: usize,
    /// Value of the `Server` response header.
    pub server_name: String,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ServerConfig {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            read_buffer_bytes: 1024,
            max_header_bytes: 64 * 1024,
            max_body_bytes: 10 * 1024 * 1024,
            server_name: concat!("plainhttp/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
