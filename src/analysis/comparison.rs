use crate::models::{AggregatedStats, ComparisonResult, MetricComparison};

/// Head-to-head comparison of two stats bundles.
///
/// Both bundles are assumed to come from successful fetches; checking that
/// is up to the caller.
pub fn compare(first: &AggregatedStats, second: &AggregatedStats) -> ComparisonResult {
    ComparisonResult {
        followers: MetricComparison::new(
            first.profile.followers() as u64,
            second.profile.followers() as u64,
        ),
        repos: MetricComparison::new(
            first.repositories.total_repos as u64,
            second.repositories.total_repos as u64,
        ),
        stars: MetricComparison::new(
            first.repositories.total_stars,
            second.repositories.total_stars,
        ),
        forks: MetricComparison::new(
            first.repositories.total_forks,
            second.repositories.total_forks,
        ),
        languages: MetricComparison::new(
            first.languages.total_languages as u64,
            second.languages.total_languages as u64,
        ),
    }
}
