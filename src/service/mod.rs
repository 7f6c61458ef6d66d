pub mod car_service;
pub mod notifier;


pub use car_service::CarService;
pub use notifier::Notifier;
