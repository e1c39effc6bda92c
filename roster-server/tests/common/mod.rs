#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use roster_core::models::User;
use roster_server::errors::ServerError;
use roster_server::store::UserStore;
use roster_server::{serve_with_shutdown, AppState};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Keeps users in insertion order, like a heap table with no ORDER BY.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), ServerError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ServerError> {
        Ok(self.snapshot())
    }
}

/// Fails every call, standing in for an unreachable database.
pub struct FailingStore;

pub const FAILURE_CAUSE: &str = "connection refused by db-internal-7:5432";

#[async_trait]
impl UserStore for FailingStore {
    async fn insert_user(&self, _user: &User) -> Result<(), ServerError> {
        Err(ServerError::Storage(FAILURE_CAUSE.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, ServerError> {
        Err(ServerError::Storage(FAILURE_CAUSE.to_string()))
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub async fn start(store: Arc<dyn UserStore>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve_with_shutdown(
            listener,
            AppState::new(store),
            async move {
                let _ = rx.await;
            },
        ));

        Ok(Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            shutdown,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, email: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(&serde_json::json!({ "username": username, "email": email }))
            .send()
            .await?;
        Ok(response)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let response = self.client.get(self.url("/users")).send().await?;
        anyhow::ensure!(
            response.status() == reqwest::StatusCode::OK,
            "GET /users returned {}",
            response.status()
        );
        Ok(response.json().await?)
    }

    pub async fn stop(self) -> Result<()> {
        drop(self.client);
        let _ = self.shutdown.send(());
        self.handle.await??;
        Ok(())
    }
}

pub fn unique_user(prefix: &str) -> User {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    User::new(format!("{}_{}", prefix, tag), format!("{}_{}@example.com", prefix, tag))
}
