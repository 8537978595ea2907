//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every GET with the same static body, whatever the path, and
//! counts the requests it has seen.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct BodyServerOptions {
    /// If false, omit `Content-Length` and close the connection to end the body.
    pub content_length: bool,
    /// Status line sent with the body.
    pub status: &'static str,
}

impl Default for BodyServerOptions {
    fn default() -> Self {
        Self {
            content_length: true,
            status: "200 OK",
        }
    }
}

pub struct BodyServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl BodyServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` (which should start with `/`).
    pub fn url(&self, path: &str) -> url::Url {
        url::Url::parse(&format!("{}{}", self.base_url, path)).expect("test url")
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body`.
/// The server runs until the process exits.
pub fn start(body: Vec<u8>) -> BodyServer {
    start_with_options(body, BodyServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: BodyServerOptions) -> BodyServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &body, opts, &hits));
        }
    });
    BodyServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: BodyServerOptions,
    hits: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(10)));

    // Read until the end of the request head.
    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    hits.fetch_add(1, Ordering::SeqCst);

    let method = std::str::from_utf8(&head)
        .ok()
        .and_then(|s| s.split_whitespace().next())
        .unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let response = if opts.content_length {
        format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            opts.status,
            body.len()
        )
    } else {
        format!("HTTP/1.1 {}\r\nConnection: close\r\n\r\n", opts.status)
    };
    let _ = stream.write_all(response.as_bytes());
    for chunk in body.chunks(16 * 1024) {
        if stream.write_all(chunk).is_err() {
            return;
        }
    }
    let _ = stream.flush();
}
