//! Mock upstream and config helpers shared by the unit tests.

use axum::{http::StatusCode, http::Uri, Router};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::Config;

/// Mock orders API listening on an ephemeral local port
pub struct MockUpstream {
    /// Base URL including an `/api/v1` prefix, as the real upstream has
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Request targets as received, path plus query when present
    pub fn paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn test_config(upstream_base_url: &str) -> Config {
    Config {
        upstream_base_url: upstream_base_url.trim_end_matches('/').to_string(),
        upstream_orders_path: "/orders".to_string(),
        upstream_timeout: Duration::from_secs(5),
        upstream_status_passthrough: false,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        service_port: 5001,
        service_host: "127.0.0.1".to_string(),
    }
}

/// Answer every request with `status` and `body`
pub async fn spawn_mock_upstream(status: StatusCode, body: &'static str) -> MockUpstream {
    spawn(status, body, Duration::ZERO).await
}

/// Answer every request with 200 after `delay`
pub async fn spawn_slow_mock_upstream(delay: Duration) -> MockUpstream {
    spawn(StatusCode::OK, "[]", delay).await
}

async fn spawn(status: StatusCode, body: &'static str, delay: Duration) -> MockUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let app = Router::new().fallback(move |uri: Uri| {
        let recorded = recorded.clone();
        async move {
            let target = uri
                .path_and_query()
                .map(|target| target.as_str().to_string())
                .unwrap_or_else(|| uri.path().to_string());
            recorded.lock().unwrap().push(target);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            (status, body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://127.0.0.1:{}/api/v1", port),
        requests,
    }
}

/// Upstream that reads one request and never answers it
pub struct HangingUpstream {
    pub base_url: String,
    /// Notified once the request head has arrived
    pub received: Arc<Notify>,
    /// Notified once the client side of the connection is closed
    pub closed: Arc<Notify>,
}

pub async fn spawn_hanging_upstream() -> HangingUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let received = Arc::new(Notify::new());
    let closed = Arc::new(Notify::new());

    let (on_received, on_closed) = (received.clone(), closed.clone());
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => {
                    on_closed.notify_one();
                    return;
                }
                Ok(n) => {
                    head.extend_from_slice(&buf[..n]);
                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
            }
        }
        on_received.notify_one();
        // Nothing more is expected; EOF means the client dropped the request
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        on_closed.notify_one();
    });

    HangingUpstream {
        base_url: format!("http://127.0.0.1:{}/api/v1", port),
        received,
        closed,
    }
}
