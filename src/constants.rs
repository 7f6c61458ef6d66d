/// Prefix for service log lines.
pub const API_NAME: &str = "[restful-cars-api]";

pub const DEFAULT_EXCHANGE: &str = "CARS";
pub const DEFAULT_QUEUE: &str = "Log";
