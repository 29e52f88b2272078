use crate::application::analytics::{
    fetch_first_responses, monthly_buckets::MonthlyBuckets, trend, workload, BreachTally,
    TimeWindows, TrendWindows,
};
use crate::config::AnalyticsConfig;
use crate::domain::entities::{Caller, Kpis, OrgScope, Summary, Trends, UserRole};
use crate::domain::errors::AnalyticsResult;
use crate::domain::ports::ticket_store::{TicketFilter, TicketGrouping, TicketStore, TimeRange};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Builds the operational dashboard summary from ticket store reads.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn TicketStore>,
    config: AnalyticsConfig,
    windows: TimeWindows,
}

impl DashboardService {
    pub fn new(store: Arc<dyn TicketStore>, config: AnalyticsConfig) -> Self {
        let windows = TimeWindows::new(config.timezone, config.locale);
        Self {
            store,
            config,
            windows,
        }
    }

    /// Compute the dashboard summary as of `now` for the caller's scope.
    ///
    /// Fails as a whole if any read fails; partial summaries are never returned.
    #[tracing::instrument(
        name = "dashboard_summary",
        skip(self, caller),
        fields(user_id = %caller.user_id, role = %caller.role)
    )]
    pub async fn compute_summary(&self, now: DateTime<Utc>, caller: &Caller) -> AnalyticsResult<Summary> {
        let started = Instant::now();
        let result = self.assemble_summary(now, caller).await;

        metrics::histogram!("dashboard_summary_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            metrics::counter!("dashboard_summary_failures_total", "kind" => e.kind()).increment(1);
        }
        result
    }

    /// Number of tickets that were open at `at`, from timestamps only.
    pub async fn count_open_at(&self, at: DateTime<Utc>, caller: &Caller) -> AnalyticsResult<i64> {
        let scope = self.resolve_scope(caller)?;
        let filter = TicketFilter::scoped(&scope).open_at(at);
        Ok(self.store.count_tickets(&filter).await?)
    }

    fn resolve_scope(&self, caller: &Caller) -> AnalyticsResult<OrgScope> {
        caller.org_scope().map_err(|e| {
            warn!("Rejecting dashboard request: {}", e);
            e
        })
    }

    async fn assemble_summary(&self, now: DateTime<Utc>, caller: &Caller) -> AnalyticsResult<Summary> {
        let scope = self.resolve_scope(caller)?;
        let base = TicketFilter::scoped(&scope);

        let today_start = self.windows.start_of_day(now);
        let today = TimeRange::between(today_start, self.windows.add_days(today_start, 1));
        let chart_start = MonthlyBuckets::window_start(&self.windows, today_start);
        let trend_windows = TrendWindows::trailing(&self.windows, now, trend::TREND_WINDOW_DAYS);

        let open_filter = base.clone().currently_open();
        let due_today_filter = open_filter.clone().created_in(today);
        let chart_filter = base.clone().created_in(TimeRange::since(chart_start));
        let resolved_today_filter = base.clone().resolved_in(today);
        let current_filter = base.clone().created_in(trend_windows.current);
        let previous_filter = base.created_in(trend_windows.previous);

        let store = self.store.as_ref();
        let (
            open_tickets,
            due_today,
            chart_tickets,
            technicians,
            open_by_assignee,
            resolved_today_by_resolver,
            current_tickets,
            previous_tickets,
        ) = tokio::try_join!(
            store.count_tickets(&open_filter),
            store.count_tickets(&due_today_filter),
            store.list_tickets(&chart_filter),
            store.list_technicians(UserRole::Technician),
            store.group_tickets(&open_filter, TicketGrouping::Assignee),
            store.group_tickets(&resolved_today_filter, TicketGrouping::Resolver),
            store.list_tickets(&current_filter),
            store.list_tickets(&previous_filter),
        )?;

        debug!(
            chart_tickets = chart_tickets.len(),
            current_tickets = current_tickets.len(),
            previous_tickets = previous_tickets.len(),
            technicians = technicians.len(),
            "Loaded dashboard slices"
        );

        let (chart_responses, current_responses, previous_responses) = tokio::try_join!(
            fetch_first_responses(store, &chart_tickets),
            fetch_first_responses(store, &current_tickets),
            fetch_first_responses(store, &previous_tickets),
        )?;

        let thresholds = &self.config.thresholds;

        let kpi_tally = BreachTally::tally(thresholds, &chart_tickets, &chart_responses)?;

        let mut months = MonthlyBuckets::trailing(&self.windows, today_start);
        months.tally(&self.windows, thresholds, &chart_tickets, &chart_responses)?;

        let current = BreachTally::tally(thresholds, &current_tickets, &current_responses)?;
        let previous = BreachTally::tally(thresholds, &previous_tickets, &previous_responses)?;

        let summary = Summary {
            kpis: Kpis {
                open_tickets,
                sla_breaches: kpi_tally.breaches(),
                due_today,
                avg_first_response_minutes: kpi_tally.average_minutes(),
            },
            trends: Trends {
                open_tickets_pct: trend::count_change(
                    current_tickets.len() as i64,
                    previous_tickets.len() as i64,
                ),
                sla_breaches_pct: trend::count_change(current.breaches(), previous.breaches()),
                avg_first_response_pct: trend::average_change(
                    current.average_minutes(),
                    previous.average_minutes(),
                ),
            },
            sla_by_month: months.into_monthly_sla(),
            agents: workload::build_agent_workloads(
                &technicians,
                &open_by_assignee,
                &resolved_today_by_resolver,
                self.config.agent_capacity,
            ),
        };

        info!(
            open_tickets = summary.kpis.open_tickets,
            sla_breaches = summary.kpis.sla_breaches,
            "Dashboard summary computed"
        );
        Ok(summary)
    }
}
