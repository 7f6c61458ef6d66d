use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use super::errors::{RepositoryError, Result};
use crate::models::{Car, NewCar};

/// Persistence gateway for cars.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Persists one car and returns it with its generated id.
    async fn save(&self, car: NewCar) -> Result<Car>;

    /// Persists every car or none of them.
    async fn save_all(&self, cars: Vec<NewCar>) -> Result<Vec<Car>>;

    async fn find_all(&self) -> Result<Vec<Car>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>>;

    async fn find_by_year(&self, year: i32) -> Result<Vec<Car>>;

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Car>>;

    /// Fails with `NotFound` if no car has this id.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert<'e, E>(executor: E, car: &NewCar) -> Result<Car>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Car>(
            "INSERT INTO cars (year, brand, model) VALUES ($1, $2, $3) RETURNING id, year, brand, model",
        )
        .bind(car.year)
        .bind(&car.brand)
        .bind(&car.model)
        .fetch_one(executor)
        .await
        .map_err(|e| RepositoryError::from_insert(e, car))
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn save(&self, car: NewCar) -> Result<Car> {
        Self::insert(&self.pool, &car).await
    }

    async fn save_all(&self, cars: Vec<NewCar>) -> Result<Vec<Car>> {
        let mut tx = self.pool.begin().await?;

        let mut saved = Vec::with_capacity(cars.len());
        for car in &cars {
            // An early return drops `tx`, which rolls the batch back.
            saved.push(Self::insert(&mut *tx, car).await?);
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn find_all(&self) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>("SELECT id, year, brand, model FROM cars ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT id, year, brand, model FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    async fn find_by_year(&self, year: i32) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, year, brand, model FROM cars WHERE year = $1 ORDER BY id",
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, year, brand, model FROM cars WHERE brand = $1 ORDER BY id",
        )
        .bind(brand)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}
