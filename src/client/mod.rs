//! HTTP client for the ticklist API, plus the view state it feeds.
//!
//! Configuration is via environment variables:
//! - `TICKLIST_URL` - Base URL (default: `http://localhost:5000/api`)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::models::*;

/// Default URL for a locally running server.
const DEFAULT_URL: &str = "http://localhost:5000/api";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Typed wrapper over the todo routes.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    client: Client,
}

impl TodoClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("TICKLIST_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    /// Create with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    /// Get all todos.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self.client.get(self.url("/todos")).send().await?;
        self.handle_response(response).await
    }

    /// Create a new todo.
    pub async fn create_todo(&self, text: impl Into<String>) -> Result<Todo, ClientError> {
        let response = self
            .client
            .post(self.url("/todos"))
            .json(&CreateTodoInput { text: text.into() })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Apply a partial update to a todo.
    pub async fn update_todo(
        &self,
        id: Uuid,
        input: &UpdateTodoInput,
    ) -> Result<Todo, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/todos/{}", id)))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a todo. Returns the removed document.
    pub async fn delete_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/todos/{}", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Check server health.
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        self.handle_response(response).await
    }
}

/// In-memory view state mirrored from the API.
///
/// Each user action issues one request and applies the server's response to
/// the local list. Network failures are logged and otherwise swallowed; the
/// local list is left untouched.
pub struct TodoApp {
    client: TodoClient,
    pub todos: Vec<Todo>,
    pub draft: String,
}

impl TodoApp {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            draft: String::new(),
        }
    }

    /// Fetch the full list once, replacing local state.
    pub async fn load(&mut self) {
        match self.client.list_todos().await {
            Ok(todos) => self.todos = todos,
            Err(e) => tracing::warn!("Error fetching todos: {}", e),
        }
    }

    /// Post the draft and append the server-returned document.
    ///
    /// A blank draft is a local no-op: nothing is sent and the draft is kept.
    pub async fn add(&mut self) {
        let text = self.draft.trim();
        if text.is_empty() {
            return;
        }

        match self.client.create_todo(text).await {
            Ok(todo) => {
                self.todos.push(todo);
                self.draft.clear();
            }
            Err(e) => tracing::warn!("Error adding todo: {}", e),
        }
    }

    /// Flip `completed` on the matching entry via the API.
    pub async fn toggle(&mut self, id: Uuid) {
        let Some(todo) = self.todos.iter().find(|t| t.id == id) else {
            return;
        };

        let input = UpdateTodoInput {
            text: None,
            completed: Some(!todo.completed),
        };
        match self.client.update_todo(id, &input).await {
            Ok(updated) => {
                for t in &mut self.todos {
                    if t.id == id {
                        *t = updated.clone();
                    }
                }
            }
            Err(e) => tracing::warn!("Error updating todo: {}", e),
        }
    }

    /// Delete via the API and drop the entry from local state.
    pub async fn remove(&mut self, id: Uuid) {
        match self.client.delete_todo(id).await {
            Ok(_) => self.todos.retain(|t| t.id != id),
            Err(e) => tracing::warn!("Error deleting todo: {}", e),
        }
    }
}
