use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn create_city_model(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCityModelRequest>,
) -> axum::response::Response {
    match services.city.create(
        body.city_name,
        body.base_population,
        body.base_growth_rate,
        body.base_price,
    ) {
        Ok(model) => (StatusCode::OK, Json(json!({ "city_model": model }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_city_model(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.city.get() {
        Ok(model) => (StatusCode::OK, Json(json!({ "city_model": model }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn reset_city_model(
    Extension(services): Extension<Arc<AppServices>>,
) -> StatusCode {
    services.city.reset();
    StatusCode::NO_CONTENT
}
