//! A fake GitHub REST API served from a local port.

#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use reqwest::StatusCode;
use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    net::{TcpListener, TcpStream},
};

/// A request the fake received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
}

type Routes = HashMap<String, VecDeque<(u16, String)>>;

/// Answers each path with a queue of canned responses; the last one repeats.
/// Unknown paths get a 404.
#[derive(Debug, Clone)]
pub struct FakeGitHub {
    pub url: String,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeGitHub {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let fake = Self {
            url,
            routes: Arc::default(),
            requests: Arc::default(),
        };

        let server = fake.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let server = server.clone();
                tokio::spawn(async move { server.serve(stream).await });
            }
        });

        fake
    }

    /// Queues a response for `path`.
    pub fn route(&self, path: &str, status: u16, body: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_owned())
            .or_default()
            .push_back((status, body.to_owned()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    async fn serve(&self, mut stream: TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0; 4096];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }

        let head = String::from_utf8_lossy(&buf).into_owned();
        let mut lines = head.split("\r\n");
        let path = lines
            .next()
            .and_then(|line| line.split(' ').nth(1))
            .unwrap_or_default()
            .to_owned();
        let headers = lines
            .take_while(|line| !line.is_empty())
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_owned()))
            .collect();
        self.requests.lock().unwrap().push(Recorded {
            path: path.clone(),
            headers,
        });

        let (status, body) = self.next_response(&path);
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default();
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    fn next_response(&self, path: &str) -> (u16, String) {
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => (404, String::from(r#"{"message": "Not Found"}"#)),
        }
    }
}

pub const RUN_PATH: &str = "/repos/octocat/Hello-World/actions/runs/8938022468";
pub const REPOSITORY_PATH: &str = "/repos/octocat/Hello-World";

/// A run body referencing the given `(path, sha)` workflows.
pub fn run_body(referenced: &[(&str, &str)]) -> String {
    let referenced = referenced
        .iter()
        .map(|(path, sha)| serde_json::json!({ "path": path, "sha": sha, "ref": null }))
        .collect::<Vec<_>>();
    serde_json::json!({
        "id": 8938022468u64,
        "head_sha": "0000000000000000000000000000000000000000",
        "referenced_workflows": referenced,
    })
    .to_string()
}
