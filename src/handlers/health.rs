use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;

use crate::service::CarService;

pub fn router() -> Router<CarService> {
    Router::new().route("/health", get(health_check))
}

/// Reports liveness along with the queue that log messages are published to.
async fn health_check(State(service): State<CarService>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "queue": service.notifier().queue_key(),
        "persistedCars": service.persisted_car_count(),
    }))
}
