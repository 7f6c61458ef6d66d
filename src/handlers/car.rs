use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::{
    brand_path, car_collection, car_path, car_resource, year_path, CarCollection, CarResource,
    NewCar, CARS_PATH,
};
use crate::service::CarService;

pub fn router() -> Router<CarService> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/upload", post(upload))
        .route("/id/{id}", get(find_by_id))
        .route("/year/{year}", get(find_by_year))
        .route("/brand/{brand}", get(find_by_brand))
        .route("/delete/{id}", delete(delete_by_id))
}

async fn create(
    State(service): State<CarService>,
    AppJson(car): AppJson<NewCar>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("{} Received car: {} {} {}", API_NAME, car.year, car.brand, car.model);

    let car = service.create(car).await?;
    let location = car_path(car.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(car_resource(car)),
    ))
}

async fn upload(
    State(service): State<CarService>,
    AppJson(cars): AppJson<Vec<NewCar>>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("{} Received upload of {} cars", API_NAME, cars.len());

    let cars = service.upload(cars).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, CARS_PATH.to_string())],
        Json(car_collection(cars, "cars", CARS_PATH)),
    ))
}

async fn find_all(State(service): State<CarService>) -> Result<Json<CarCollection>, AppError> {
    let cars = service.find_all().await?;
    Ok(Json(car_collection(cars, "self", CARS_PATH)))
}

async fn find_by_id(
    State(service): State<CarService>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CarResource>, AppError> {
    let car = service.find_by_id(id).await?;
    Ok(Json(car_resource(car)))
}

async fn find_by_year(
    State(service): State<CarService>,
    AppPath(year): AppPath<i32>,
) -> Result<Json<CarCollection>, AppError> {
    let cars = service.find_by_year(year).await?;
    Ok(Json(car_collection(cars, "self", year_path(year))))
}

async fn find_by_brand(
    State(service): State<CarService>,
    AppPath(brand): AppPath<String>,
) -> Result<Json<CarCollection>, AppError> {
    let cars = service.find_by_brand(&brand).await?;
    Ok(Json(car_collection(cars, "self", brand_path(&brand))))
}

async fn delete_by_id(
    State(service): State<CarService>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
