use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::constants::API_NAME;
use crate::models::{Car, NewCar};
use crate::repository::{CarRepository, RepositoryError};

use super::notifier::Notifier;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Car operations shared by every handler. Each successful operation sends
/// exactly one log message; failed operations send none.
#[derive(Clone)]
pub struct CarService {
    repo: Arc<dyn CarRepository>,
    notifier: Notifier,
    persisted_car_count: Arc<AtomicU64>,
}

impl CarService {
    pub fn new(repo: Arc<dyn CarRepository>, notifier: Notifier) -> Self {
        Self {
            repo,
            notifier,
            persisted_car_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn persisted_car_count(&self) -> u64 {
        self.persisted_car_count.load(Ordering::Relaxed)
    }

    fn log_persisted_car_count(&self, added: u64) {
        let before = self.persisted_car_count.fetch_add(added, Ordering::Relaxed);
        let count = before + added;
        if count / 10 > before / 10 {
            tracing::info!("{} *** Persisted cars count: {} ***", API_NAME, count);
        }
    }

    pub async fn create(&self, car: NewCar) -> Result<Car> {
        let car = self.repo.save(car).await?;
        self.log_persisted_car_count(1);
        tracing::info!("{} Created car: {}", API_NAME, car.id);

        self.notifier.notify("Created a car");
        Ok(car)
    }

    pub async fn upload(&self, cars: Vec<NewCar>) -> Result<Vec<Car>> {
        let cars = self.repo.save_all(cars).await?;
        self.log_persisted_car_count(cars.len() as u64);
        tracing::info!("{} Loaded {} cars", API_NAME, cars.len());

        self.notifier.notify("Data loaded");
        Ok(cars)
    }

    pub async fn find_all(&self) -> Result<Vec<Car>> {
        let cars = self.repo.find_all().await?;
        self.notifier.notify("Search for all cars");
        Ok(cars)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Car> {
        let car = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound(id))?;

        self.notifier.notify(format!("Search for car id {}", id));
        Ok(car)
    }

    pub async fn find_by_year(&self, year: i32) -> Result<Vec<Car>> {
        let cars = self.repo.find_by_year(year).await?;
        self.notifier
            .notify(format!("Search for cars produced in {}", year));
        Ok(cars)
    }

    pub async fn find_by_brand(&self, brand: &str) -> Result<Vec<Car>> {
        let cars = self.repo.find_by_brand(brand).await?;
        self.notifier.notify(format!("Search for {}", brand));
        Ok(cars)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        tracing::info!("{} Deleted car: {}", API_NAME, id);

        self.notifier.notify(format!("Car id {} data deleted", id));
        Ok(())
    }
}
