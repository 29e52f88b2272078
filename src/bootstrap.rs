use crate::application::services::DashboardService;
use crate::config::AnalyticsConfig;
use crate::domain::ports::clock::{Clock, SystemClock};
use crate::domain::ports::ticket_store::TicketStore;
use crate::infrastructure::http::middleware::AppState;
use std::sync::Arc;

/// Wire the dashboard service over a ticket store.
pub fn build_app_state(store: Arc<dyn TicketStore>, analytics: AnalyticsConfig) -> AppState {
    build_app_state_with_clock(store, analytics, Arc::new(SystemClock))
}

pub fn build_app_state_with_clock(
    store: Arc<dyn TicketStore>,
    analytics: AnalyticsConfig,
    clock: Arc<dyn Clock>,
) -> AppState {
    tracing::info!(
        timezone = %analytics.timezone,
        agent_capacity = analytics.agent_capacity,
        "Dashboard analytics configured"
    );

    AppState {
        dashboard_service: Arc::new(DashboardService::new(store, analytics)),
        clock,
    }
}
