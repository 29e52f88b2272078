use crate::domain::entities::{Activity, Technician, Ticket, UserRole, CLOSED_STATUS_KEY};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ports::ticket_store::{TicketFilter, TicketGrouping, TicketStore, TimeRange};
use crate::infrastructure::persistence::{parse_db_timestamp, to_db_timestamp, Database};
use sqlx::{any::AnyRow, Row};
use std::collections::HashMap;

/// Upper bound on ids per `IN (...)` list, below SQLite's bound-parameter limit.
const ACTIVITY_BATCH_SIZE: usize = 500;

const TICKET_COLUMNS: &str =
    "id, org_id, priority, status_key, created_at, resolved_at, closed_at, assignee_id, resolved_by_id";

/// SQL condition plus its positional bind values.
struct WhereClause {
    sql: String,
    binds: Vec<String>,
}

impl WhereClause {
    fn from_filter(filter: &TicketFilter) -> Self {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds = Vec::new();

        if let Some(org_id) = &filter.org_id {
            conditions.push("org_id = ?".to_string());
            binds.push(org_id.clone());
        }
        if filter.open_only {
            conditions.push("status_key <> ?".to_string());
            binds.push(CLOSED_STATUS_KEY.to_string());
        }
        if let Some(range) = &filter.created {
            push_range(&mut conditions, &mut binds, "created_at", range);
        }
        if let Some(range) = &filter.resolved {
            conditions.push("resolved_at IS NOT NULL".to_string());
            push_range(&mut conditions, &mut binds, "resolved_at", range);
        }
        if let Some(at) = filter.open_at {
            let at = to_db_timestamp(at);
            conditions.push("julianday(created_at) <= julianday(?)".to_string());
            conditions.push("(resolved_at IS NULL OR julianday(resolved_at) > julianday(?))".to_string());
            conditions.push("(closed_at IS NULL OR julianday(closed_at) > julianday(?))".to_string());
            binds.extend([at.clone(), at.clone(), at]);
        }

        let sql = if conditions.is_empty() {
            "1 = 1".to_string()
        } else {
            conditions.join(" AND ")
        };
        Self { sql, binds }
    }
}

/// Instants are compared through `julianday()`, so stored values may use any
/// RFC 3339 form (with or without fractional seconds, `Z` or a numeric offset).
fn push_range(conditions: &mut Vec<String>, binds: &mut Vec<String>, column: &str, range: &TimeRange) {
    conditions.push(format!("julianday({}) >= julianday(?)", column));
    binds.push(to_db_timestamp(range.from));
    if let Some(before) = range.before {
        conditions.push(format!("julianday({}) < julianday(?)", column));
        binds.push(to_db_timestamp(before));
    }
}

/// Nullable text column. The Any driver reports SQL NULL as a type of its own
/// that does not decode into `Option<String>`, so a failed read is absent.
fn nullable_text(row: &AnyRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column).ok().flatten()
}

fn nullable_timestamp(row: &AnyRow, column: &str) -> StoreResult<Option<chrono::DateTime<chrono::Utc>>> {
    nullable_text(row, column)
        .as_deref()
        .map(parse_db_timestamp)
        .transpose()
}

fn ticket_from_row(row: &AnyRow) -> StoreResult<Ticket> {
    let priority: String = row.try_get("priority")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(Ticket {
        id: row.try_get("id")?,
        org_id: nullable_text(row, "org_id"),
        priority: priority.parse().map_err(StoreError::Decode)?,
        status_key: row.try_get("status_key")?,
        created_at: parse_db_timestamp(&created_at)?,
        resolved_at: nullable_timestamp(row, "resolved_at")?,
        closed_at: nullable_timestamp(row, "closed_at")?,
        assignee_id: nullable_text(row, "assignee_id"),
        resolved_by_id: nullable_text(row, "resolved_by_id"),
    })
}

fn activity_from_row(row: &AnyRow) -> StoreResult<Activity> {
    let created_at: String = row.try_get("created_at")?;
    Ok(Activity {
        ticket_id: row.try_get("ticket_id")?,
        activity_type: row.try_get("type")?,
        actor_id: nullable_text(row, "actor_id"),
        created_at: parse_db_timestamp(&created_at)?,
    })
}

#[async_trait::async_trait]
impl TicketStore for Database {
    async fn count_tickets(&self, filter: &TicketFilter) -> StoreResult<i64> {
        let clause = WhereClause::from_filter(filter);
        let sql = format!("SELECT COUNT(*) AS count FROM tickets WHERE {}", clause.sql);

        let mut query = sqlx::query(&sql);
        for value in &clause.binds {
            query = query.bind(value);
        }
        let row = query.fetch_one(&self.pool).await?;

        Ok(row.try_get("count")?)
    }

    async fn list_tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        let clause = WhereClause::from_filter(filter);
        let sql = format!(
            "SELECT {} FROM tickets WHERE {} ORDER BY julianday(created_at) ASC, id ASC",
            TICKET_COLUMNS, clause.sql
        );

        let mut query = sqlx::query(&sql);
        for value in &clause.binds {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.iter().map(ticket_from_row).collect()
    }

    async fn list_activities(&self, ticket_ids: &[String]) -> StoreResult<Vec<Activity>> {
        if ticket_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut activities = Vec::new();
        let chunks = ticket_ids.chunks(ACTIVITY_BATCH_SIZE);
        let multiple_batches = chunks.len() > 1;

        for chunk in chunks {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT ticket_id, type, actor_id, created_at
                 FROM ticket_activities
                 WHERE ticket_id IN ({})
                 ORDER BY julianday(created_at) ASC, id ASC",
                placeholders
            );

            let mut query = sqlx::query(&sql);
            for id in chunk {
                query = query.bind(id);
            }
            let rows = query.fetch_all(&self.pool).await?;
            for row in &rows {
                activities.push(activity_from_row(row)?);
            }
        }

        // Stable sort keeps per-batch order for equal timestamps.
        if multiple_batches {
            activities.sort_by_key(|a| a.created_at);
        }

        Ok(activities)
    }

    async fn list_technicians(&self, role: UserRole) -> StoreResult<Vec<Technician>> {
        let rows = sqlx::query("SELECT id, name FROM users WHERE role = ? ORDER BY name ASC, id ASC")
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(Technician {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    async fn group_tickets(
        &self,
        filter: &TicketFilter,
        grouping: TicketGrouping,
    ) -> StoreResult<HashMap<String, i64>> {
        let column = match grouping {
            TicketGrouping::Assignee => "assignee_id",
            TicketGrouping::Resolver => "resolved_by_id",
        };
        let clause = WhereClause::from_filter(filter);
        let sql = format!(
            "SELECT {column} AS user_id, COUNT(*) AS count
             FROM tickets
             WHERE {where_sql} AND {column} IS NOT NULL
             GROUP BY {column}",
            column = column,
            where_sql = clause.sql
        );

        let mut query = sqlx::query(&sql);
        for value in &clause.binds {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;

        let mut counts = HashMap::with_capacity(rows.len());
        for row in &rows {
            let user_id: String = row.try_get("user_id")?;
            let count: i64 = row.try_get("count")?;
            counts.insert(user_id, count);
        }
        Ok(counts)
    }
}
