use crate::application::analytics::first_response::FirstResponses;
use crate::domain::entities::{Priority, Ticket};
use crate::domain::errors::{AnalyticsError, AnalyticsResult};
use std::collections::BTreeMap;

/// Allowed first-response latency, in minutes, per ticket priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaThresholds {
    minutes: BTreeMap<Priority, i64>,
}

impl Default for SlaThresholds {
    fn default() -> Self {
        Self::from_pairs([
            (Priority::Urgent, 60),
            (Priority::High, 240),
            (Priority::Medium, 480),
            (Priority::Low, 1440),
        ])
    }
}

impl SlaThresholds {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Priority, i64)>) -> Self {
        Self {
            minutes: pairs.into_iter().collect(),
        }
    }

    pub fn threshold_for(&self, priority: Priority) -> AnalyticsResult<i64> {
        self.minutes
            .get(&priority)
            .copied()
            .ok_or(AnalyticsError::MissingSlaThreshold(priority))
    }

    /// Every priority a ticket can carry must have a threshold.
    pub fn validate(&self) -> AnalyticsResult<()> {
        for priority in Priority::ALL {
            self.threshold_for(priority)?;
        }
        Ok(())
    }

    /// Breach iff the latency is strictly above the threshold.
    /// Tickets without a response are never breaches.
    pub fn is_breach(&self, priority: Priority, minutes: Option<i64>) -> AnalyticsResult<bool> {
        Ok(self.outcome(priority, minutes)? == Some(SlaOutcome::Breached))
    }

    pub fn outcome(
        &self,
        priority: Priority,
        minutes: Option<i64>,
    ) -> AnalyticsResult<Option<SlaOutcome>> {
        let threshold = self.threshold_for(priority)?;
        Ok(minutes.map(|m| {
            if m > threshold {
                SlaOutcome::Breached
            } else {
                SlaOutcome::Met
            }
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaOutcome {
    Met,
    Breached,
}

/// Breach count and latency average over the responded tickets of a slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreachTally {
    breaches: i64,
    responded: i64,
    total_minutes: i64,
}

impl BreachTally {
    pub fn tally(
        thresholds: &SlaThresholds,
        tickets: &[Ticket],
        responses: &FirstResponses,
    ) -> AnalyticsResult<Self> {
        let mut tally = Self::default();
        for ticket in tickets {
            let minutes = responses.minutes_for(&ticket.id);
            if let (Some(outcome), Some(minutes)) =
                (thresholds.outcome(ticket.priority, minutes)?, minutes)
            {
                tally.record(outcome, minutes);
            }
        }
        Ok(tally)
    }

    pub fn record(&mut self, outcome: SlaOutcome, minutes: i64) {
        self.responded += 1;
        self.total_minutes += minutes;
        if outcome == SlaOutcome::Breached {
            self.breaches += 1;
        }
    }

    pub fn breaches(&self) -> i64 {
        self.breaches
    }

    pub fn responded(&self) -> i64 {
        self.responded
    }

    pub fn average_minutes(&self) -> Option<f64> {
        if self.responded == 0 {
            None
        } else {
            Some(self.total_minutes as f64 / self.responded as f64)
        }
    }
}
