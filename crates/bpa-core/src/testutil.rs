//! Loopback HTTP helpers for exercising download and API paths without
//! the network.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Nothing listens on the discard port; connecting fails immediately.
/// Used to prove a code path performs no network call.
pub(crate) const UNROUTABLE_URL: &str = "http://127.0.0.1:9/unreachable";

/// One scripted HTTP response.
pub(crate) struct CannedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub body: Vec<u8>,
}

impl CannedResponse {
    pub fn new(status: u16, reason: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            reason,
            body,
        }
    }

    pub fn ok(body: Vec<u8>) -> Self {
        Self::new(200, "OK", body)
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found", Vec::new())
    }
}

/// Answer the next `responses.len()` requests in order, then stop.
/// Returns the server's base URL without a trailing path.
pub(crate) fn serve_sequence(responses: Vec<CannedResponse>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener has a local address");

    thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = [0u8; 65536];
            let _ = stream.read(&mut request);
            let header = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status,
                response.reason,
                response.body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&response.body);
        }
    });

    format!("http://{addr}")
}

/// Serve `body` with status 200 for the next request, then stop.
pub(crate) fn serve_once(body: Vec<u8>) -> String {
    format!("{}/payload", serve_sequence(vec![CannedResponse::ok(body)]))
}

/// Answer the next request with 404 Not Found, then stop.
pub(crate) fn serve_not_found() -> String {
    format!("{}/payload", serve_sequence(vec![CannedResponse::not_found()]))
}
