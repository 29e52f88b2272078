pub mod analytics;
pub mod services;
