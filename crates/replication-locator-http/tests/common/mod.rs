// crates/replication-locator-http/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Local tiny_http fixtures for transport tests.
// Purpose: Serve routed responses and record incoming requests.
// Dependencies: tiny_http
// ============================================================================

//! ## Overview
//! [`FixtureServer`] answers every request through a routing closure on a
//! background thread and records the method, path, and user agent of each
//! request. Dropping the fixture unblocks and joins the server thread.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Routed Responses
// ============================================================================

/// Response produced by a fixture route.
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            headers: vec![("Location".to_string(), location.into())],
            body: Vec::new(),
        }
    }
}

/// One request observed by the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub user_agent: Option<String>,
}

// ============================================================================
// SECTION: Fixture Server
// ============================================================================

/// Local HTTP server answering requests through a routing closure.
pub struct FixtureServer {
    server: Arc<Server>,
    addr: String,
    seen: Arc<Mutex<Vec<Seen>>>,
    handle: Option<JoinHandle<()>>,
}

impl FixtureServer {
    pub fn spawn<F>(route: F) -> Self
    where
        F: Fn(&Method, &str) -> Reply + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("http server"));
        let addr = server.server_addr().to_string();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let worker = Arc::clone(&server);
        let log = Arc::clone(&seen);
        let handle = thread::spawn(move || {
            for request in worker.incoming_requests() {
                let user_agent = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("User-Agent"))
                    .map(|header| header.value.as_str().to_string());
                log.lock().unwrap().push(Seen {
                    method: request.method().as_str().to_string(),
                    path: request.url().to_string(),
                    user_agent,
                });
                let reply = route(request.method(), request.url());
                let mut response = Response::from_data(reply.body).with_status_code(reply.status);
                for (name, value) in reply.headers {
                    response.add_header(
                        Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap(),
                    );
                }
                let _ = request.respond(response);
            }
        });
        Self {
            server,
            addr,
            seen,
            handle: Some(handle),
        }
    }

    /// Returns an absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Returns the requests observed so far.
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Accepts one connection, reads the request, and never answers.
pub fn silent_server() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0_u8; 1024];
            let _ = stream.read(&mut buf);
            thread::sleep(std::time::Duration::from_millis(1_500));
            let _ = stream.flush();
        }
    });
    (addr, handle)
}
