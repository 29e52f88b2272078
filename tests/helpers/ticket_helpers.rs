#![allow(dead_code)]
use chrono::{DateTime, Duration, Utc};
use deskpulse::domain::entities::{Activity, Priority, Technician, Ticket, UserRole};
use deskpulse::infrastructure::persistence::{to_db_timestamp, Database};
use uuid::Uuid;

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// Fixed reference instant used across the dashboard tests (a Monday).
pub fn test_now() -> DateTime<Utc> {
    utc("2026-06-15T12:00:00Z")
}

/// Open, unassigned ticket with no resolution timestamps.
pub fn make_ticket(id: &str, priority: Priority, created_at: DateTime<Utc>) -> Ticket {
    Ticket {
        id: id.to_string(),
        org_id: Some("org-1".to_string()),
        priority,
        status_key: "open".to_string(),
        created_at,
        resolved_at: None,
        closed_at: None,
        assignee_id: None,
        resolved_by_id: None,
    }
}

pub fn make_reply(ticket: &Ticket, actor_id: &str, after: Duration) -> Activity {
    Activity {
        ticket_id: ticket.id.clone(),
        activity_type: "comment".to_string(),
        actor_id: Some(actor_id.to_string()),
        created_at: ticket.created_at + after,
    }
}

pub fn make_created_event(ticket: &Ticket) -> Activity {
    Activity {
        ticket_id: ticket.id.clone(),
        activity_type: "created".to_string(),
        actor_id: Some("requester".to_string()),
        created_at: ticket.created_at,
    }
}

pub async fn insert_user(db: &Database, technician: &Technician, role: UserRole) {
    sqlx::query("INSERT INTO users (id, name, role, org_id, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(&technician.id)
        .bind(&technician.name)
        .bind(role.as_str())
        .bind(None::<String>)
        .bind(to_db_timestamp(test_now()))
        .execute(db.pool())
        .await
        .expect("Failed to insert user");
}

pub async fn insert_ticket(db: &Database, ticket: &Ticket) {
    sqlx::query(
        "INSERT INTO tickets (id, org_id, priority, status_key, created_at, resolved_at, closed_at, assignee_id, resolved_by_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&ticket.id)
    .bind(ticket.org_id.clone())
    .bind(ticket.priority.as_str())
    .bind(&ticket.status_key)
    .bind(to_db_timestamp(ticket.created_at))
    .bind(ticket.resolved_at.map(to_db_timestamp))
    .bind(ticket.closed_at.map(to_db_timestamp))
    .bind(ticket.assignee_id.clone())
    .bind(ticket.resolved_by_id.clone())
    .execute(db.pool())
    .await
    .expect("Failed to insert ticket");
}

pub async fn insert_activity(db: &Database, activity: &Activity) {
    sqlx::query(
        "INSERT INTO ticket_activities (id, ticket_id, type, actor_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&activity.ticket_id)
    .bind(&activity.activity_type)
    .bind(activity.actor_id.clone())
    .bind(to_db_timestamp(activity.created_at))
    .execute(db.pool())
    .await
    .expect("Failed to insert activity");
}
