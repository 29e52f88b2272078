use crate::domain::entities::{Activity, Ticket};
use crate::domain::errors::StoreResult;
use crate::domain::ports::ticket_store::TicketStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// First-response latency per ticket id, in whole minutes.
///
/// A ticket maps to `None` when no qualifying activity exists yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstResponses {
    minutes: HashMap<String, Option<i64>>,
}

impl FirstResponses {
    pub fn minutes_for(&self, ticket_id: &str) -> Option<i64> {
        self.minutes.get(ticket_id).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    pub fn responded(&self) -> usize {
        self.minutes.values().filter(|m| m.is_some()).count()
    }
}

/// Earliest qualifying activity per ticket.
///
/// Activities are compared by timestamp; on equal timestamps the one seen
/// first in `activities` wins.
pub fn first_response_instants(activities: &[Activity]) -> HashMap<&str, DateTime<Utc>> {
    let mut first: HashMap<&str, DateTime<Utc>> = HashMap::new();
    for activity in activities.iter().filter(|a| a.counts_as_response()) {
        first
            .entry(activity.ticket_id.as_str())
            .and_modify(|at| {
                if activity.created_at < *at {
                    *at = activity.created_at;
                }
            })
            .or_insert(activity.created_at);
    }
    first
}

/// Rounded minutes from `opened` to `responded`, never negative.
pub fn elapsed_minutes(opened: DateTime<Utc>, responded: DateTime<Utc>) -> i64 {
    let millis = (responded - opened).num_milliseconds();
    let minutes = (millis as f64 / 60_000.0).round();
    minutes.max(0.0) as i64
}

pub fn compute_first_responses(tickets: &[Ticket], activities: &[Activity]) -> FirstResponses {
    let instants = first_response_instants(activities);
    let minutes = tickets
        .iter()
        .map(|ticket| {
            let latency = instants
                .get(ticket.id.as_str())
                .map(|responded| elapsed_minutes(ticket.created_at, *responded));
            (ticket.id.clone(), latency)
        })
        .collect();
    FirstResponses { minutes }
}

/// Fetch the activities of all `tickets` in one batched read and derive their first responses.
pub async fn fetch_first_responses(
    store: &dyn TicketStore,
    tickets: &[Ticket],
) -> StoreResult<FirstResponses> {
    if tickets.is_empty() {
        return Ok(FirstResponses::default());
    }

    let ids: Vec<String> = tickets.iter().map(|t| t.id.clone()).collect();
    let activities = store.list_activities(&ids).await?;
    tracing::debug!(
        tickets = tickets.len(),
        activities = activities.len(),
        "Computing first responses"
    );

    Ok(compute_first_responses(tickets, &activities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Priority;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-06-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            org_id: None,
            priority: Priority::Urgent,
            status_key: "open".to_string(),
            created_at: t0(),
            resolved_at: None,
            closed_at: None,
            assignee_id: None,
            resolved_by_id: None,
        }
    }

    fn activity(ticket_id: &str, kind: &str, actor: Option<&str>, offset_secs: i64) -> Activity {
        Activity {
            ticket_id: ticket_id.to_string(),
            activity_type: kind.to_string(),
            actor_id: actor.map(str::to_string),
            created_at: t0() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn test_skips_creation_and_anonymous_activities() {
        let activities = vec![
            activity("t1", "created", Some("u1"), 0),
            activity("t1", "comment", None, 60),
            activity("t1", "status_changed", Some("u2"), 30 * 60),
        ];
        let responses = compute_first_responses(&[ticket("t1")], &activities);
        assert_eq!(responses.minutes_for("t1"), Some(30));
    }

    #[test]
    fn test_ticket_without_qualifying_activity_is_none() {
        let activities = vec![activity("t1", "created", Some("u1"), 0)];
        let responses = compute_first_responses(&[ticket("t1"), ticket("t2")], &activities);
        assert_eq!(responses.minutes_for("t1"), None);
        assert_eq!(responses.minutes_for("t2"), None);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.responded(), 0);
    }

    #[test]
    fn test_earliest_activity_wins_regardless_of_input_order() {
        let activities = vec![
            activity("t1", "comment", Some("u1"), 90 * 60),
            activity("t1", "comment", Some("u2"), 45 * 60),
        ];
        let responses = compute_first_responses(&[ticket("t1")], &activities);
        assert_eq!(responses.minutes_for("t1"), Some(45));
    }

    #[test]
    fn test_minutes_are_rounded() {
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(89)), 1);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(90)), 2);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(29)), 0);
    }

    #[test]
    fn test_activity_before_creation_clamps_to_zero() {
        assert_eq!(elapsed_minutes(t0(), t0() - Duration::minutes(5)), 0);
    }
}
