use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::services::AppServices;

/// Static sample series for the chart pages.
pub fn router() -> Router {
    Router::new()
        .route("/housing/historical-data", get(housing_history))
        .route("/housing/trend", get(housing_trend))
        .route("/food/historical-data", get(food_history))
        .route("/food/trend", get(food_trend))
}

pub async fn housing_history(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.housing_history.to_json())
}

pub async fn housing_trend(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.housing_history.trend())
}

pub async fn food_history(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.food_history.to_json())
}

pub async fn food_trend(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.food_history.trend())
}
