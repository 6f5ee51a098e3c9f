use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to Alien Simulation API" }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
