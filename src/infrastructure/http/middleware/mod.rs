pub mod auth;
pub mod error;

pub use auth::AuthenticatedCaller;
pub use error::{ApiError, ApiResult};

use crate::application::services::DashboardService;
use crate::domain::ports::clock::Clock;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: Arc<DashboardService>,
    pub clock: Arc<dyn Clock>,
}
