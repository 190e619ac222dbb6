#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread::{self, JoinHandle};

use plainhttp::{
    Application, Response, Server, ServerConfig, ShutdownHandle, http::parser::parse_response,
};

pub struct TestServer {
    pub addr: SocketAddr,
    handle: ShutdownHandle,
    join: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn spawn<A: Application + 'static>(app: A) -> TestServer {
        let mut server = Server::new(ServerConfig::new("127.0.0.1", 0), app);
        let addr = server.start().expect("bind test server");
        let handle = server.shutdown_handle().expect("server started");
        let join = thread::spawn(move || server.serve_forever().expect("accept loop"));
        TestServer {
            addr,
            handle,
            join: Some(join),
        }
    }

    /// Sends raw bytes and reads until the server closes the connection.
    pub fn send_raw(&self, raw: &[u8]) -> Vec<u8> {
        let mut client = TcpStream::connect(self.addr).expect("connect");
        client.write_all(raw).expect("write request");
        let mut reply = Vec::new();
        client.read_to_end(&mut reply).expect("read response");
        reply
    }

    pub fn send(&self, raw: &[u8]) -> Response {
        parse_response(&self.send_raw(raw)).expect("well-formed response")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.stop();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
