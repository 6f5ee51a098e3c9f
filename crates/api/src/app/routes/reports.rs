use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn daily_report(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DailyReportRequest>,
) -> axum::response::Response {
    match services.reports.process(body.into()).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
