use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::db::DynStore;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
fn internal_error(context: &'static str) -> impl Fn(anyhow::Error) -> ErrorResponse {
    move |e| {
        tracing::error!("Internal error: {:#}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": context })),
        )
    }
}

fn not_found() -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Todo not found" })),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

// ============================================================
// Todos
// ============================================================

pub async fn list_todos(
    State(store): State<DynStore>,
) -> Result<Json<Vec<Todo>>, ErrorResponse> {
    store
        .list()
        .map(Json)
        .map_err(internal_error("Failed to get todos"))
}

pub async fn create_todo(
    State(store): State<DynStore>,
    Json(input): Json<CreateTodoInput>,
) -> Result<(StatusCode, Json<Todo>), ErrorResponse> {
    if input.text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Text is required" })),
        ));
    }

    store
        .create(input.text)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(internal_error("Failed to create todo"))
}

pub async fn update_todo(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodoInput>,
) -> Result<Json<Todo>, ErrorResponse> {
    store
        .update_by_id(id, input)
        .map_err(internal_error("Failed to update todo"))?
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn delete_todo(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ErrorResponse> {
    store
        .delete_by_id(id)
        .map_err(internal_error("Failed to delete todo"))?
        .map(Json)
        .ok_or_else(not_found)
}
