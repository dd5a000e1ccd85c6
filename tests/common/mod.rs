#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use school_registry::config::AppConfig;
use school_registry::database::{
    DatabaseError, Facets, MemorySchoolStore, NewSchool, School, SchoolQuery, SchoolStore,
};
use school_registry::server::{self, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start the real router on a free port with a fresh in-memory store
pub async fn spawn_server() -> Result<TestServer> {
    spawn_with_store(Arc::new(MemorySchoolStore::new())).await
}

pub async fn spawn_with_store(store: Arc<dyn SchoolStore>) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let app = server::app(AppState::from_arc(store), &AppConfig::development());
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        handle,
    })
}

/// The record used throughout the API examples
pub fn oak_high() -> serde_json::Value {
    serde_json::json!({
        "name": "Oak High",
        "address": "1 Elm St",
        "city": "Springfield",
        "state": "IL",
        "contact": 5551234567i64,
        "image": "",
        "email_id": "oak@x.org"
    })
}

/// A store whose backend is unreachable
pub struct DownStore;

#[async_trait]
impl SchoolStore for DownStore {
    fn backend(&self) -> &'static str {
        "down"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _school: NewSchool) -> Result<School, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn list(&self) -> Result<Vec<School>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn search(&self, _query: &SchoolQuery) -> Result<Vec<School>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn facets(&self) -> Result<Facets, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }
}
