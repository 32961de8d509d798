pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod storage;
pub mod analysis;

pub use config::{Config, StatsConfig};
pub use error::{Error, ErrorKind, Result};
pub use github::{GitHubClient, RepositoryProvider};
pub use analysis::{compare, Outcome, StatsAggregator, StatsService};
pub use storage::TtlCache;
