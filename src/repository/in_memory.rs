//! In-memory car storage for tests and local runs without PostgreSQL.
//!
//! Enforces the same `(year, brand, model)` uniqueness and all-or-nothing
//! batch semantics as the database-backed repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::car_repo::CarRepository;
use super::errors::{RepositoryError, Result};
use crate::models::{Car, NewCar};

#[derive(Debug, Default)]
struct Store {
    cars: BTreeMap<i64, Car>,
    last_id: i64,
}

impl Store {
    fn contains(&self, car: &NewCar) -> bool {
        self.cars.values().any(|stored| car.matches(stored))
    }

    fn insert(&mut self, car: NewCar) -> Car {
        self.last_id += 1;
        let car = car.into_car(self.last_id);
        self.cars.insert(car.id, car.clone());
        car
    }

    fn filter(&self, predicate: impl Fn(&Car) -> bool) -> Vec<Car> {
        self.cars.values().filter(|c| predicate(*c)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCarRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn save(&self, car: NewCar) -> Result<Car> {
        let mut store = self.store.write().await;
        if store.contains(&car) {
            return Err(RepositoryError::duplicate(&car));
        }
        Ok(store.insert(car))
    }

    async fn save_all(&self, cars: Vec<NewCar>) -> Result<Vec<Car>> {
        let mut store = self.store.write().await;

        // Validate the whole batch, including duplicates inside it, before
        // touching the store.
        for (i, car) in cars.iter().enumerate() {
            if store.contains(car) || cars[..i].contains(car) {
                return Err(RepositoryError::duplicate(car));
            }
        }

        Ok(cars.into_iter().map(|car| store.insert(car)).collect())
    }

    async fn find_all(&self) -> Result<Vec<Car>> {
        let store = self.store.read().await;
        Ok(store.cars.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>> {
        let store = self.store.read().await;
        Ok(store.cars.get(&id).cloned())
    }

    async fn find_by_year(&self, year: i32) -> Result<Vec<Car>> {
        let store = self.store.read().await;
        Ok(store.filter(|c| c.year == year))
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Car>> {
        let store = self.store.read().await;
        Ok(store.filter(|c| c.brand == brand))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;
        if store.cars.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let repo = InMemoryCarRepository::new();

        let first = repo.save(NewCar::new(2020, "Toyota", "Camry")).await.unwrap();
        let second = repo.save(NewCar::new(2019, "Honda", "Civic")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_save_duplicate_keeps_single_record() {
        let repo = InMemoryCarRepository::new();
        repo.save(NewCar::new(2020, "Toyota", "Camry")).await.unwrap();

        let result = repo.save(NewCar::new(2020, "Toyota", "Camry")).await;

        assert!(matches!(result, Err(RepositoryError::Duplicate { .. })));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_all_is_all_or_nothing() {
        let repo = InMemoryCarRepository::new();
        repo.save(NewCar::new(2020, "Toyota", "Camry")).await.unwrap();

        let result = repo
            .save_all(vec![
                NewCar::new(2018, "Ford", "Focus"),
                NewCar::new(2020, "Toyota", "Camry"),
            ])
            .await;

        assert!(matches!(result, Err(RepositoryError::Duplicate { .. })));
        assert!(repo.find_by_brand("Ford").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_all_rejects_duplicates_within_batch() {
        let repo = InMemoryCarRepository::new();

        let result = repo
            .save_all(vec![
                NewCar::new(2018, "Ford", "Focus"),
                NewCar::new(2018, "Ford", "Focus"),
            ])
            .await;

        assert!(result.is_err());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_filters_return_empty_when_nothing_matches() {
        let repo = InMemoryCarRepository::new();
        repo.save(NewCar::new(2020, "Toyota", "Camry")).await.unwrap();

        assert!(repo.find_by_year(1999).await.unwrap().is_empty());
        assert!(repo.find_by_brand("toyota").await.unwrap().is_empty());
        assert_eq!(repo.find_by_brand("Toyota").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let repo = InMemoryCarRepository::new();
        let car = repo.save(NewCar::new(2020, "Toyota", "Camry")).await.unwrap();

        repo.delete_by_id(car.id).await.unwrap();

        assert!(repo.find_by_id(car.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_by_id(car.id).await,
            Err(RepositoryError::NotFound(id)) if id == car.id
        ));
    }
}
