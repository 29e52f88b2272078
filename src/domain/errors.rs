use crate::domain::entities::{Priority, UserRole};
use thiserror::Error;

/// Failure of one of the ticket store reads.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to decode stored value: {0}")]
    Decode(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Role {role} requires an organization scope but user {user_id} has none")]
    ScopeRequired { role: UserRole, user_id: String },
    #[error("No SLA threshold configured for priority {0}")]
    MissingSlaThreshold(Priority),
    #[error("Ticket store read failed: {0}")]
    Store(#[from] StoreError),
}

impl AnalyticsError {
    /// Short label used for failure metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::ScopeRequired { .. } => "scope",
            AnalyticsError::MissingSlaThreshold(_) => "configuration",
            AnalyticsError::Store(_) => "read_failure",
        }
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
