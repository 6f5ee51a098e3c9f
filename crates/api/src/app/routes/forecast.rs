use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::dto;
use crate::app::services::AppServices;

/// Forecasts always answer 200: AI failures become fallback results and invalid input
/// a `validation_error` result.
pub async fn predict_housing(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PredictRequest>,
) -> axum::response::Response {
    let result = services.housing.predict(&body.into()).await;
    (StatusCode::OK, Json(result)).into_response()
}

pub async fn predict_food(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::FoodPredictRequest>,
) -> axum::response::Response {
    let result = services.food.predict(&body.into()).await;
    (StatusCode::OK, Json(result)).into_response()
}
