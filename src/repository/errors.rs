use thiserror::Error;

use crate::models::NewCar;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Could not find car id {0}")]
    NotFound(i64),

    #[error("Car {year} {brand} {model} already exists")]
    Duplicate {
        year: i32,
        brand: String,
        model: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn duplicate(car: &NewCar) -> Self {
        Self::Duplicate {
            year: car.year,
            brand: car.brand.clone(),
            model: car.model.clone(),
        }
    }

    /// Turns a unique_violation (SQLSTATE 23505) into `Duplicate`, passing
    /// every other error through.
    pub fn from_insert(err: sqlx::Error, car: &NewCar) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return Self::duplicate(car);
            }
        }
        Self::Database(err)
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
