#![allow(dead_code)]
use async_trait::async_trait;
use deskpulse::application::analytics::point_in_time::is_open_at;
use deskpulse::domain::entities::{Activity, Technician, Ticket, UserRole};
use deskpulse::domain::errors::{StoreError, StoreResult};
use deskpulse::domain::ports::ticket_store::{TicketFilter, TicketGrouping, TicketStore};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ticket store over plain vectors, evaluating filters with the domain predicates.
#[derive(Default)]
pub struct InMemoryTicketStore {
    pub tickets: Vec<Ticket>,
    pub activities: Vec<Activity>,
    pub users: Vec<(Technician, UserRole)>,
    activity_reads: AtomicUsize,
    reads: AtomicUsize,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.tickets.push(ticket);
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn with_technician(mut self, id: &str, name: &str) -> Self {
        self.users
            .push((Technician::new(id, name), UserRole::Technician));
        self
    }

    pub fn with_user(mut self, id: &str, name: &str, role: UserRole) -> Self {
        self.users.push((Technician::new(id, name), role));
        self
    }

    /// Number of `list_activities` calls served so far.
    pub fn activity_reads(&self) -> usize {
        self.activity_reads.load(Ordering::SeqCst)
    }

    /// Number of reads of any kind served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn matching<'a>(&'a self, filter: &'a TicketFilter) -> impl Iterator<Item = &'a Ticket> + 'a {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.tickets.iter().filter(move |t| matches_filter(filter, t))
    }
}

pub fn matches_filter(filter: &TicketFilter, ticket: &Ticket) -> bool {
    filter
        .org_id
        .as_deref()
        .map_or(true, |org| ticket.org_id.as_deref() == Some(org))
        && (!filter.open_only || ticket.is_currently_open())
        && filter.created.map_or(true, |r| r.contains(ticket.created_at))
        && filter
            .resolved
            .map_or(true, |r| ticket.resolved_at.map_or(false, |at| r.contains(at)))
        && filter.open_at.map_or(true, |at| is_open_at(ticket, at))
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn count_tickets(&self, filter: &TicketFilter) -> StoreResult<i64> {
        Ok(self.matching(filter).count() as i64)
    }

    async fn list_tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self.matching(filter).cloned().collect();
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tickets)
    }

    async fn list_activities(&self, ticket_ids: &[String]) -> StoreResult<Vec<Activity>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.activity_reads.fetch_add(1, Ordering::SeqCst);
        let wanted: HashSet<&str> = ticket_ids.iter().map(String::as_str).collect();
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .filter(|a| wanted.contains(a.ticket_id.as_str()))
            .cloned()
            .collect();
        activities.sort_by_key(|a| a.created_at);
        Ok(activities)
    }

    async fn list_technicians(&self, role: UserRole) -> StoreResult<Vec<Technician>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut technicians: Vec<Technician> = self
            .users
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(t, _)| t.clone())
            .collect();
        technicians.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(technicians)
    }

    async fn group_tickets(
        &self,
        filter: &TicketFilter,
        grouping: TicketGrouping,
    ) -> StoreResult<HashMap<String, i64>> {
        let mut counts = HashMap::new();
        for ticket in self.matching(filter) {
            let user = match grouping {
                TicketGrouping::Assignee => &ticket.assignee_id,
                TicketGrouping::Resolver => &ticket.resolved_by_id,
            };
            if let Some(user) = user {
                *counts.entry(user.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

/// Store whose every read fails, as an unreachable database would.
#[derive(Default)]
pub struct UnavailableTicketStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl TicketStore for UnavailableTicketStore {
    async fn count_tickets(&self, _filter: &TicketFilter) -> StoreResult<i64> {
        unavailable()
    }

    async fn list_tickets(&self, _filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        unavailable()
    }

    async fn list_activities(&self, _ticket_ids: &[String]) -> StoreResult<Vec<Activity>> {
        unavailable()
    }

    async fn list_technicians(&self, _role: UserRole) -> StoreResult<Vec<Technician>> {
        unavailable()
    }

    async fn group_tickets(
        &self,
        _filter: &TicketFilter,
        _grouping: TicketGrouping,
    ) -> StoreResult<HashMap<String, i64>> {
        unavailable()
    }
}
