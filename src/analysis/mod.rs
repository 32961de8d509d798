pub mod aggregator;
pub mod charts;
pub mod comparison;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::StatsAggregator;
pub use charts::{ChartRenderer, SeriesChartRenderer};
pub use comparison::compare;
pub use service::{validate_account_name, Outcome, StatsService};
