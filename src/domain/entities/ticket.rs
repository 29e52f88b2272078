use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status key that marks a ticket as terminal for live "open" counts.
pub const CLOSED_STATUS_KEY: &str = "closed";

/// Activity type recorded when a ticket is opened. Never counts as a response.
pub const CREATED_ACTIVITY_TYPE: &str = "created";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            _ => Err(format!("Invalid ticket priority: {}", s)),
        }
    }
}

/// Read-only snapshot of a ticket as seen by the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub org_id: Option<String>,
    pub priority: Priority,
    pub status_key: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub assignee_id: Option<String>,
    pub resolved_by_id: Option<String>,
}

impl Ticket {
    /// Live status check, used for "currently open" counts only.
    pub fn is_currently_open(&self) -> bool {
        self.status_key != CLOSED_STATUS_KEY
    }
}

/// One entry of a ticket's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub ticket_id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub actor_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// A first response is any non-creation activity performed by an identified actor.
    pub fn counts_as_response(&self) -> bool {
        self.activity_type != CREATED_ACTIVITY_TYPE && self.actor_id.is_some()
    }
}
