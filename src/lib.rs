pub mod app;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod queue;
pub mod repository;
pub mod service;

pub use app::create_app;
