use crate::domain::entities::Ticket;
use chrono::{DateTime, Utc};

/// Whether the ticket was open at `at`, judged from its timestamps alone.
///
/// The live `status_key` is not consulted.
pub fn is_open_at(ticket: &Ticket, at: DateTime<Utc>) -> bool {
    ticket.created_at <= at
        && ticket.resolved_at.map_or(true, |resolved| resolved > at)
        && ticket.closed_at.map_or(true, |closed| closed > at)
}

pub fn count_open_at<'a>(tickets: impl IntoIterator<Item = &'a Ticket>, at: DateTime<Utc>) -> usize {
    tickets.into_iter().filter(|t| is_open_at(t, at)).count()
}
