use crate::domain::entities::{Activity, OrgScope, Technician, Ticket, UserRole};
use crate::domain::errors::StoreResult;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Half-open instant range `[from, before)`. An absent `before` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub before: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn between(from: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        Self {
            from,
            before: Some(before),
        }
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self { from, before: None }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.from && self.before.map_or(true, |before| instant < before)
    }
}

/// Predicate over tickets understood by every store implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub org_id: Option<String>,
    /// Live status check: `status_key != "closed"`.
    pub open_only: bool,
    pub created: Option<TimeRange>,
    pub resolved: Option<TimeRange>,
    /// Point-in-time open check, evaluated from timestamps only.
    pub open_at: Option<DateTime<Utc>>,
}

impl TicketFilter {
    pub fn scoped(scope: &OrgScope) -> Self {
        Self {
            org_id: scope.org_id().map(str::to_string),
            ..Self::default()
        }
    }

    pub fn currently_open(mut self) -> Self {
        self.open_only = true;
        self
    }

    pub fn created_in(mut self, range: TimeRange) -> Self {
        self.created = Some(range);
        self
    }

    pub fn resolved_in(mut self, range: TimeRange) -> Self {
        self.resolved = Some(range);
        self
    }

    pub fn open_at(mut self, at: DateTime<Utc>) -> Self {
        self.open_at = Some(at);
        self
    }
}

/// Which user column a grouped count is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketGrouping {
    Assignee,
    Resolver,
}

/// Read-only access to tickets, activities and technicians.
#[async_trait::async_trait]
pub trait TicketStore: Send + Sync {
    async fn count_tickets(&self, filter: &TicketFilter) -> StoreResult<i64>;

    async fn list_tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>>;

    /// Activities for all given tickets in one batched read, ordered by `created_at` ascending.
    async fn list_activities(&self, ticket_ids: &[String]) -> StoreResult<Vec<Activity>>;

    /// Users holding `role`, ordered by name.
    async fn list_technicians(&self, role: UserRole) -> StoreResult<Vec<Technician>>;

    /// Ticket counts per user id. Tickets with no user in the grouped column are skipped.
    async fn group_tickets(
        &self,
        filter: &TicketFilter,
        grouping: TicketGrouping,
    ) -> StoreResult<HashMap<String, i64>>;
}
