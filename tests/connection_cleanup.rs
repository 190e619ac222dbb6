//! Kept in its own test binary: counting open descriptors is only reliable
//! when no other test in the process is opening sockets.

mod common;

use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use common::TestServer;
use plainhttp::{HandlerResult, Router, RouterApp, StatusCode};

fn open_fds() -> usize {
    fs::read_dir("/proc/self/fd").map(|dir| dir.count()).unwrap_or(0)
}

#[test]
#[cfg(target_os = "linux")]
fn failing_handlers_do_not_leak_sockets() {
    let mut router = Router::new();
    router
        .get("/explode", |_, _| -> HandlerResult { panic!("handler bug") })
        .unwrap();
    router.get("/fail", |_, _| Err("refused".into())).unwrap();
    let server = TestServer::spawn(RouterApp::new(router));

    // Warm up so lazily opened descriptors are already counted
    server.send(b"GET /fail HTTP/1.1\r\n\r\n");
    let baseline = open_fds();

    for _ in 0..20 {
        let response = server.send(b"GET /explode HTTP/1.1\r\n\r\n");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let response = server.send(b"GET /fail HTTP/1.1\r\n\r\n");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    let deadline = Instant::now() + Duration::from_secs(2);
    while open_fds() > baseline && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert!(open_fds() <= baseline, "descriptors leaked: {} > {}", open_fds(), baseline);
}
