//! HAL-style response bodies for cars.
//!
//! A single car is rendered with `self` and `cars` links; a list of cars is
//! wrapped in `_embedded.carList` with one link describing the list itself.

use serde::Serialize;
use std::collections::BTreeMap;

use super::Car;

pub const CARS_PATH: &str = "/cars";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

pub type Links = BTreeMap<&'static str, Link>;

#[derive(Debug, Clone, Serialize)]
pub struct CarResource {
    #[serde(flatten)]
    pub car: Car,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedCars {
    #[serde(rename = "carList")]
    pub car_list: Vec<CarResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedCars,
    #[serde(rename = "_links")]
    pub links: Links,
}

pub fn car_path(id: i64) -> String {
    format!("{}/id/{}", CARS_PATH, id)
}

pub fn year_path(year: i32) -> String {
    format!("{}/year/{}", CARS_PATH, year)
}

/// Path of the brand search; the brand is percent-encoded as one segment.
pub fn brand_path(brand: &str) -> String {
    format!("{}/brand/{}", CARS_PATH, urlencoding::encode(brand))
}

pub fn car_resource(car: Car) -> CarResource {
    let mut links = Links::new();
    links.insert("self", Link::new(car_path(car.id)));
    links.insert("cars", Link::new(CARS_PATH));
    CarResource { car, links }
}

/// Wraps `cars` in a collection whose only link is `rel` -> `href`.
pub fn car_collection(cars: Vec<Car>, rel: &'static str, href: impl Into<String>) -> CarCollection {
    let mut links = Links::new();
    links.insert(rel, Link::new(href));
    CarCollection {
        embedded: EmbeddedCars {
            car_list: cars.into_iter().map(car_resource).collect(),
        },
        links,
    }
}
