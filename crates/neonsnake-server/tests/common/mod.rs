use std::net::SocketAddr;
use std::time::Duration;

use futures::StreamExt;

use neonsnake_server::config::{LimitsConfig, ServerConfig};
use neonsnake_server::{build_app, spawn_live_games};

pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with default configuration.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// Start a test server with a tight SSE subscriber cap.
    pub async fn with_sse_limit(max_sse_subscribers: usize) -> Self {
        let config = ServerConfig {
            limits: LimitsConfig {
                max_sse_subscribers,
                ..LimitsConfig::default()
            },
            ..ServerConfig::default()
        };
        Self::from_config(config).await
    }

    async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, state) = build_app(config);
        spawn_live_games(&state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }
}

/// Sign up a fresh account and return its bearer token.
pub async fn signup(server: &TestServer, username: &str, email: &str) -> String {
    let client = reqwest::Client::new();
    let resp = client
        .post(server.api_url("/auth/signup"))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": "hunter22",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "signup should succeed");
    let body: serde_json::Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Read `n` SSE `data:` payloads from an open response, parsed as JSON.
/// Panics if the stream stalls for more than 5 seconds.
pub async fn read_sse_frames(resp: reqwest::Response, n: usize) -> Vec<serde_json::Value> {
    let mut stream = resp.bytes_stream();
    let mut buf = String::new();
    let mut frames = Vec::new();

    tokio::time::timeout(Duration::from_secs(5), async {
        while frames.len() < n {
            let chunk = stream
                .next()
                .await
                .expect("SSE stream ended early")
                .expect("SSE stream error");
            buf.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(boundary) = buf.find("\n\n") {
                let event: String = buf[..boundary].to_string();
                buf.drain(..boundary + 2);
                for line in event.lines() {
                    if let Some(data) = line.strip_prefix("data:") {
                        frames.push(
                            serde_json::from_str(data.trim_start())
                                .expect("frame is valid JSON"),
                        );
                    }
                }
            }
        }
    })
    .await
    .expect("timed out waiting for SSE frames");

    frames
}
