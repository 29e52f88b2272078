pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::DashboardService;
pub use config::{AnalyticsConfig, Config};
