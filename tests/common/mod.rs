//! Mock endpoint shared by the integration tests.
//!
//! Runs an axum server on a random port in its own thread and runtime, so
//! both blocking and async tests can talk to it. Every handler records how
//! many requests were in flight at once.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// `/async/{FAILING_INDEX}` answers 500 with a JSON error body.
pub const FAILING_INDEX: usize = 13;
pub const AUTH_KEY: &str = "blahblah";

#[derive(Default)]
pub struct Stats {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    hits: AtomicUsize,
}

impl Stats {
    fn enter(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub struct MockServer {
    pub base: String,
    pub stats: Arc<Stats>,
}

impl MockServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

fn app(stats: Arc<Stats>) -> Router {
    Router::new()
        .route("/async/:idx", get(indexed).post(indexed).put(indexed).delete(indexed))
        .route("/plain/:idx", get(plain))
        .route("/aligner", post(aligner))
        .with_state(stats)
}

pub fn spawn() -> MockServer {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let stats = Arc::new(Stats::default());
    let app = app(stats.clone());
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    MockServer { base: format!("http://{addr}"), stats }
}

/// A base URL nothing is listening on.
pub fn dead_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/async/")
}

// Lower indices sleep longer so completion order is roughly reversed.
async fn indexed(
    State(stats): State<Arc<Stats>>,
    method: Method,
    Path(idx): Path<usize>,
) -> (StatusCode, Json<Value>) {
    stats.enter();
    tokio::time::sleep(Duration::from_millis(((10 - idx % 10) * 5) as u64)).await;
    stats.leave();

    if idx == FAILING_INDEX {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom", "idx": idx})));
    }
    (StatusCode::OK, Json(json!({"idx": idx, "method": method.as_str()})))
}

async fn plain(State(stats): State<Arc<Stats>>, Path(_idx): Path<usize>) -> &'static str {
    stats.enter();
    stats.leave();
    "not json"
}

async fn aligner(
    State(stats): State<Arc<Stats>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    stats.enter();
    let auth = headers
        .get("auth-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut file_name = None;
    let mut audio_len = None;
    let mut text = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                file_name = field.file_name().map(str::to_string);
                audio_len = Some(field.bytes().await.unwrap().len());
            }
            "text" => text = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    stats.leave();

    if auth != AUTH_KEY {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad auth-key"})));
    }
    (StatusCode::OK, Json(json!({"file_name": file_name, "audio_len": audio_len, "text": text})))
}

/// A scratch directory removed on drop.
pub struct TempDir(pub PathBuf);

impl TempDir {
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = std::env::temp_dir().join(format!("rusty-fanout-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        for (name, contents) in files {
            std::fs::write(dir.join(name), contents).unwrap();
        }
        Self(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
