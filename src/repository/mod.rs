pub mod car_repo;
pub mod errors;
pub mod in_memory;

pub use car_repo::{CarRepository, PgCarRepository};
pub use errors::RepositoryError;
pub use in_memory::InMemoryCarRepository;
