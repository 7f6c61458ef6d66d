pub mod car;
pub mod log_message;
pub mod resource;

pub use car::{Car, NewCar};
pub use log_message::LogMessage;
pub use resource::{
    brand_path, car_collection, car_path, car_resource, year_path, CarCollection, CarResource,
    CARS_PATH,
};
