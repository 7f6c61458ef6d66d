use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored car. `(year, brand, model)` is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub year: i32,
    pub brand: String,
    pub model: String,
}

/// Request body for creating a car. An `id` in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCar {
    pub year: i32,
    pub brand: String,
    pub model: String,
}

impl NewCar {
    pub fn new(year: i32, brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year,
            brand: brand.into(),
            model: model.into(),
        }
    }

    pub fn into_car(self, id: i64) -> Car {
        Car {
            id,
            year: self.year,
            brand: self.brand,
            model: self.model,
        }
    }

    /// True if `car` carries the same `(year, brand, model)` triple.
    pub fn matches(&self, car: &Car) -> bool {
        self.year == car.year && self.brand == car.brand && self.model == car.model
    }
}
