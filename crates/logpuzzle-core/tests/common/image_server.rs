//! Minimal HTTP/1.1 server for fetcher integration tests.
//!
//! Serves fixed bodies by path. Paths can be configured to always fail with a
//! status, or to fail a number of times with 503 before succeeding.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Default)]
pub struct Routes {
    /// path → body served with 200.
    pub bodies: HashMap<String, Vec<u8>>,
    /// path → status always returned instead of a body.
    pub failing: HashMap<String, u16>,
    /// path → number of leading requests answered with 503.
    pub flaky: HashMap<String, u32>,
}

impl Routes {
    pub fn body(mut self, path: &str, body: &[u8]) -> Self {
        self.bodies.insert(path.to_string(), body.to_vec());
        self
    }

    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.failing.insert(path.to_string(), status);
        self
    }

    pub fn flaky(mut self, path: &str, failures: u32, body: &[u8]) -> Self {
        self.flaky.insert(path.to_string(), failures);
        self.body(path, body)
    }
}

pub struct ImageServer {
    base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl ImageServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Request paths in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

/// Starts the server on a background thread; it runs until the process exits.
pub fn start(routes: Routes) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(Mutex::new(routes));
    let hits = Arc::new(Mutex::new(Vec::new()));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    ImageServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &Mutex<Routes>, hits: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();
    hits.lock().unwrap().push(path.clone());

    if !method.eq_ignore_ascii_case("GET") {
        respond(&mut stream, "405 Method Not Allowed", b"");
        return;
    }

    let (status, body) = {
        let mut guard = routes.lock().unwrap();
        let routes = &mut *guard;
        if let Some(code) = routes.failing.get(&path) {
            (status_line(*code), Vec::new())
        } else if let Some(left) = routes.flaky.get_mut(&path).filter(|left| **left > 0) {
            *left -= 1;
            (status_line(503), Vec::new())
        } else if let Some(body) = routes.bodies.get(&path) {
            (status_line(200), body.clone())
        } else {
            (status_line(404), Vec::new())
        }
    };
    respond(&mut stream, &status, &body);
}

fn status_line(code: u16) -> String {
    let reason = match code {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };
    format!("{} {}", code, reason)
}

fn respond(stream: &mut std::net::TcpStream, status: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: image/jpeg\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
