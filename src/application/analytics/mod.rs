pub mod first_response;
pub mod monthly_buckets;
pub mod point_in_time;
pub mod sla_breach;
pub mod time_window;
pub mod trend;
pub mod workload;

pub use first_response::{fetch_first_responses, FirstResponses};
pub use monthly_buckets::MonthlyBuckets;
pub use sla_breach::{BreachTally, SlaOutcome, SlaThresholds};
pub use time_window::TimeWindows;
pub use trend::TrendWindows;
