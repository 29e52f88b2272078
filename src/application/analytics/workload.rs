use crate::domain::entities::{AgentWorkload, Technician};
use std::collections::HashMap;

/// One workload row per technician, in roster order.
pub fn build_agent_workloads(
    technicians: &[Technician],
    open_by_assignee: &HashMap<String, i64>,
    resolved_today_by_resolver: &HashMap<String, i64>,
    capacity: i64,
) -> Vec<AgentWorkload> {
    technicians
        .iter()
        .map(|tech| AgentWorkload {
            id: tech.id.clone(),
            name: tech.name.clone(),
            initials: tech.initials(),
            open_tickets: open_by_assignee.get(&tech.id).copied().unwrap_or(0),
            resolved_today: resolved_today_by_resolver
                .get(&tech.id)
                .copied()
                .unwrap_or(0),
            capacity,
        })
        .collect()
}
