use serde::{Deserialize, Serialize};

/// Dashboard payload. Key names are consumed verbatim by the dashboard UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub kpis: Kpis,
    pub trends: Trends,
    pub sla_by_month: Vec<MonthlySla>,
    pub agents: Vec<AgentWorkload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub open_tickets: i64,
    pub sla_breaches: i64,
    pub due_today: i64,
    pub avg_first_response_minutes: Option<f64>,
}

/// Week-over-week percentage deltas. `None` when there is no baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub open_tickets_pct: Option<f64>,
    pub sla_breaches_pct: Option<f64>,
    pub avg_first_response_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySla {
    pub label: String,
    pub met: i64,
    pub breached: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentWorkload {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub open_tickets: i64,
    pub resolved_today: i64,
    pub capacity: i64,
}
