mod aggregate;
mod checkpoint;
mod forecast;
mod remind;

pub use aggregate::{SprintAggregator, SprintData, SprintMetric};
pub use checkpoint::{days_since_start, is_checkpoint_day};
pub use forecast::{forecast, ForecastReport, Risk};
pub use remind::build_reminder;
