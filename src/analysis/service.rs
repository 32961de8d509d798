use std::sync::Arc;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::analysis::aggregator::StatsAggregator;
use crate::analysis::charts::{ChartRenderer, SeriesChartRenderer};
use crate::analysis::comparison::compare;
use crate::config::StatsConfig;
use crate::error::{Error, Result};
use crate::github::RepositoryProvider;
use crate::models::{AggregatedStats, ComparisonReport};
use crate::storage::TtlCache;

/// Result value handed to callers of the service. Errors never escape the
/// service as `Err`; they become `Failure` with a readable message.
///
/// Serializes as `{"success": true, "data": ..}` or
/// `{"success": false, "error": ".."}`.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error.as_str()),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Outcome::Success(data) => Ok(data),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Outcome::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Rejects names that cannot be a GitHub login. Returns the trimmed name.
pub fn validate_account_name(account: &str) -> Result<&str> {
    let account = account.trim();
    if account.is_empty() {
        return Err(Error::Validation("account name must not be empty".to_string()));
    }
    if account.contains(|c: char| c == '/' || c.is_whitespace()) {
        return Err(Error::Validation(format!("{:?} is not a valid account name", account)));
    }
    Ok(account)
}

pub fn cache_key(account: &str) -> String {
    format!("stats:{}", account)
}

/// Serves aggregated stats per account through a TTL cache.
///
/// Concurrent requests for the same uncached account are not coalesced:
/// each one fetches, and the last to finish wins the cache slot.
pub struct StatsService {
    provider: Arc<dyn RepositoryProvider>,
    aggregator: StatsAggregator,
    renderer: Box<dyn ChartRenderer>,
    cache: TtlCache<Arc<AggregatedStats>>,
}

impl StatsService {
    pub fn new(provider: impl RepositoryProvider + 'static, config: &StatsConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            aggregator: StatsAggregator::new(config.top_repos_count),
            renderer: Box::new(SeriesChartRenderer::new(config.top_repos_count)),
            cache: TtlCache::new(config.cache_ttl),
        }
    }

    pub fn with_renderer(mut self, renderer: impl ChartRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub async fn get_stats(&self, account: &str) -> Outcome<Arc<AggregatedStats>> {
        let account = match validate_account_name(account) {
            Ok(account) => account,
            Err(e) => return Outcome::Failure(e.to_string()),
        };

        let key = cache_key(account);
        if let Some(stats) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Outcome::Success(stats);
        }

        tracing::info!("Cache miss for {}, fetching from {}", key, self.provider.name());
        match self.fetch_and_aggregate(account).await {
            Ok(stats) => {
                let stats = Arc::new(stats);
                self.cache.set(key, Arc::clone(&stats));
                Outcome::Success(stats)
            }
            Err(e) => {
                // Failures are not cached so the next request retries upstream.
                tracing::warn!("Failed to build stats for {}: {}", account, e);
                Outcome::Failure(e.to_string())
            }
        }
    }

    async fn fetch_and_aggregate(&self, account: &str) -> Result<AggregatedStats> {
        let data = self.provider.fetch(account).await?;
        tracing::info!(
            "Aggregating {} repositories for {}",
            data.repositories.len(),
            data.profile.login
        );

        let mut stats = self.aggregator.aggregate(data.profile, &data.repositories);
        stats.charts = self.renderer.render(&data.repositories, &stats.activity);
        Ok(stats)
    }

    /// Fetches both accounts concurrently and compares them. Fails if
    /// either account fails, naming the one that did.
    pub async fn compare_accounts(&self, first: &str, second: &str) -> Outcome<ComparisonReport> {
        let (a, b) = futures::join!(self.get_stats(first), self.get_stats(second));

        let first_stats = match a {
            Outcome::Success(stats) => stats,
            Outcome::Failure(e) => return Outcome::Failure(format!("{}: {}", first.trim(), e)),
        };
        let second_stats = match b {
            Outcome::Success(stats) => stats,
            Outcome::Failure(e) => return Outcome::Failure(format!("{}: {}", second.trim(), e)),
        };

        Outcome::Success(ComparisonReport {
            comparison: compare(&first_stats, &second_stats),
            first: first_stats,
            second: second_stats,
        })
    }

    /// Drops the cached stats of an account. Names that could never have
    /// been cached are rejected instead of silently ignored.
    pub fn invalidate(&self, account: &str) -> Result<()> {
        let account = validate_account_name(account)?;
        self.cache.delete(&cache_key(account));
        Ok(())
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &TtlCache<Arc<AggregatedStats>> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::{profile, repo};
    use crate::models::{AccountData, Winner};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    struct MockProvider {
        calls: Arc<AtomicUsize>,
        gate: Option<Arc<Barrier>>,
    }

    impl MockProvider {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let provider = Self {
                calls: Arc::clone(&calls),
                gate: None,
            };
            (provider, calls)
        }
    }

    #[async_trait]
    impl RepositoryProvider for MockProvider {
        async fn fetch(&self, account: &str) -> Result<AccountData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.wait().await;
            }

            match account {
                "ghost" => Err(Error::AccountNotFound(account.to_string())),
                "limited" => Err(Error::RateLimited(60)),
                "alice" => Ok(AccountData {
                    profile: profile("alice", 100),
                    repositories: vec![repo("a", 10, Some("Rust")), repo("b", 5, Some("Go"))],
                }),
                _ => Ok(AccountData {
                    profile: profile(account, 50),
                    repositories: vec![repo("c", 20, Some("Rust"))],
                }),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn service(provider: MockProvider, ttl: Duration) -> StatsService {
        let config = StatsConfig {
            cache_ttl: ttl,
            ..StatsConfig::default()
        };
        StatsService::new(provider, &config)
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let (provider, calls) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        let first = service.get_stats("alice").await.into_result().unwrap();
        let second = service.get_stats("alice").await.into_result().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(service.cache().contains_key("stats:alice"));
        assert_eq!(first.repositories.total_stars, 15);
        assert!(!first.charts.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_is_reported_and_not_cached() {
        let (provider, calls) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        let outcome = service.get_stats("ghost").await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), Some("Account not found: ghost"));
        assert!(!service.cache().contains_key(&cache_key("ghost")));

        service.get_stats("ghost").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_cached() {
        let (provider, _) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        let outcome = service.get_stats("limited").await;
        assert!(outcome.error().unwrap().contains("Rate limit exceeded"));
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_names_skip_provider() {
        let (provider, calls) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        assert!(!service.get_stats("").await.is_success());
        assert!(!service.get_stats("   ").await.is_success());
        assert!(!service.get_stats("octo/repo").await.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_entries_are_refetched() {
        let (provider, calls) = MockProvider::new();
        let service = service(provider, Duration::ZERO);

        service.get_stats("bob").await;
        service.get_stats("bob").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (provider, calls) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        service.get_stats("bob").await;
        service.invalidate(" bob ").unwrap();
        service.get_stats("bob").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        service.clear_cache();
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_rejects_invalid_names() {
        let (provider, _) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        service.get_stats("bob").await;
        let err = service.invalidate("a/b").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
        assert!(matches!(service.invalidate("  "), Err(Error::Validation(_))));
        assert!(service.cache().contains_key("stats:bob"));
    }

    #[tokio::test]
    async fn test_concurrent_misses_both_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MockProvider {
            calls: Arc::clone(&calls),
            gate: Some(Arc::new(Barrier::new(2))),
        };
        let service = service(provider, Duration::from_secs(60));

        // Both requests are inside the provider at the same time, so neither
        // could have seen the other's cache entry.
        let (a, b) = tokio::join!(service.get_stats("bob"), service.get_stats("bob"));

        assert!(a.is_success() && b.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_compare_accounts() {
        let (provider, _) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        let report = service.compare_accounts("alice", "bob").await.into_result().unwrap();
        assert_eq!(report.comparison.followers.value_a, 100);
        assert_eq!(report.comparison.followers.value_b, 50);
        assert_eq!(report.comparison.followers.difference, 50);
        assert_eq!(report.comparison.followers.winner, Winner::First);
        assert_eq!(report.comparison.stars.winner, Winner::Second);
        assert_eq!(report.first.profile.login, "alice");
        assert_eq!(report.second.profile.login, "bob");
    }

    #[tokio::test]
    async fn test_compare_reports_failing_account() {
        let (provider, _) = MockProvider::new();
        let service = service(provider, Duration::from_secs(60));

        let outcome = service.compare_accounts("alice", "ghost").await;
        assert_eq!(outcome.error(), Some("ghost: Account not found: ghost"));
        assert!(service.cache().contains_key("stats:alice"));
    }

    #[test]
    fn test_outcome_serialization() {
        let ok: Outcome<u32> = Outcome::Success(7);
        let failed: Outcome<u32> = Outcome::Failure("boom".to_string());

        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"success":true,"data":7}"#);
        assert_eq!(
            serde_json::to_string(&failed).unwrap(),
            r#"{"success":false,"error":"boom"}"#
        );
    }

    #[test]
    fn test_validate_account_name_trims() {
        assert_eq!(validate_account_name("  octo ").unwrap(), "octo");
        assert!(matches!(validate_account_name(""), Err(Error::Validation(_))));
    }
}
