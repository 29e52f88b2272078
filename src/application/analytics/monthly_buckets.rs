use crate::application::analytics::first_response::FirstResponses;
use crate::application::analytics::sla_breach::{SlaOutcome, SlaThresholds};
use crate::application::analytics::time_window::TimeWindows;
use crate::domain::entities::{MonthlySla, Ticket};
use crate::domain::errors::AnalyticsResult;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Number of months shown in the SLA history chart, current month included.
pub const SLA_HISTORY_MONTHS: i32 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bucket {
    key: String,
    label: String,
    met: i64,
    breached: i64,
}

/// Met/breached counters for the current month and the five before it.
#[derive(Debug, Clone)]
pub struct MonthlyBuckets {
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl MonthlyBuckets {
    /// Buckets oldest first, ending with the month containing `today_start`.
    pub fn trailing(windows: &TimeWindows, today_start: DateTime<Utc>) -> Self {
        let buckets: Vec<Bucket> = (0..SLA_HISTORY_MONTHS)
            .rev()
            .map(|back| {
                let month = windows.add_months(today_start, -back);
                Bucket {
                    key: windows.month_key(month),
                    label: windows.month_label(month),
                    met: 0,
                    breached: 0,
                }
            })
            .collect();
        let index = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (b.key.clone(), i))
            .collect();
        Self { buckets, index }
    }

    /// Earliest creation instant the chart slice needs to load.
    pub fn window_start(windows: &TimeWindows, today_start: DateTime<Utc>) -> DateTime<Utc> {
        windows.add_months(today_start, -SLA_HISTORY_MONTHS)
    }

    /// Count each responded ticket in the bucket of its creation month.
    /// Tickets created outside the bucketed months are ignored.
    pub fn tally(
        &mut self,
        windows: &TimeWindows,
        thresholds: &SlaThresholds,
        tickets: &[Ticket],
        responses: &FirstResponses,
    ) -> AnalyticsResult<()> {
        for ticket in tickets {
            let Some(&idx) = self.index.get(&windows.month_key(ticket.created_at)) else {
                continue;
            };
            match thresholds.outcome(ticket.priority, responses.minutes_for(&ticket.id))? {
                Some(SlaOutcome::Met) => self.buckets[idx].met += 1,
                Some(SlaOutcome::Breached) => self.buckets[idx].breached += 1,
                None => {}
            }
        }
        Ok(())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.key.as_str()).collect()
    }

    pub fn into_monthly_sla(self) -> Vec<MonthlySla> {
        self.buckets
            .into_iter()
            .map(|b| MonthlySla {
                label: b.label,
                met: b.met,
                breached: b.breached,
            })
            .collect()
    }
}
