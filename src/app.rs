use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{car, health};
use crate::models::CARS_PATH;
use crate::service::CarService;

/// Builds the application router around a ready `CarService`.
pub fn create_app(service: CarService) -> Router {
    Router::new()
        .nest(CARS_PATH, car::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
