use crate::{errors::ApiError, AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    Json,
};
use roster_core::models::{RegisterRequest, User};
use std::sync::Arc;

pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let user = RegisterRequest::from_body(&body)?.into_user()?;

    state.store.insert_user(&user).await.map_err(|e| {
        tracing::error!(%e, "Failed to insert user");
        ApiError::InternalServerError
    })?;

    tracing::debug!(username = %user.username, "Registered user");
    Ok(StatusCode::CREATED)
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.list_users().await.map_err(|e| {
        tracing::error!(%e, "Failed to query users");
        ApiError::InternalServerError
    })?;

    Ok(Json(users))
}

pub async fn get_only() -> (StatusCode, [(header::HeaderName, &'static str); 1]) {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}
