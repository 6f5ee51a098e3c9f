use axum::{
    Router,
    routing::{get, post},
};

pub mod city;
pub mod forecast;
pub mod historical;
pub mod reports;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/predict", post(forecast::predict_housing))
        .route("/predict-food", post(forecast::predict_food))
        .route(
            "/city-model",
            post(city::create_city_model)
                .get(city::get_city_model)
                .delete(city::reset_city_model),
        )
        .route("/daily-report", post(reports::daily_report))
        .nest("/api", historical::router())
}
