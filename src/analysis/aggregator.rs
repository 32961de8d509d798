use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::models::{
    AccountProfile, ActivitySummary, AggregatedStats, ForkSplit, LanguageShare, LanguageSummary,
    Repository, RepositorySummary, TopRepository, WeeklyActivity,
};

pub const TOP_LANGUAGES: usize = 10;
pub const ACTIVITY_WINDOW_DAYS: i64 = 365;

const NO_DESCRIPTION: &str = "No description";
const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Turns a profile and its repository list into summary statistics.
///
/// Holds only the ranking size; every call is independent. The repository
/// list is expected to be bounded already, nothing is truncated here.
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    top_n: usize,
}

impl StatsAggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Aggregates relative to the current time. Charts are left empty for
    /// the caller to fill in.
    pub fn aggregate(&self, profile: AccountProfile, repositories: &[Repository]) -> AggregatedStats {
        self.aggregate_at(profile, repositories, Utc::now())
    }

    pub fn aggregate_at(
        &self,
        profile: AccountProfile,
        repositories: &[Repository],
        now: DateTime<Utc>,
    ) -> AggregatedStats {
        AggregatedStats {
            profile,
            repositories: self.repository_summary(repositories),
            languages: language_summary(repositories),
            activity: activity_summary(repositories, now),
            charts: BTreeMap::new(),
        }
    }

    pub fn repository_summary(&self, repositories: &[Repository]) -> RepositorySummary {
        let total_stars: u64 = repositories.iter().map(|r| r.stargazers_count as u64).sum();
        let total_forks: u64 = repositories.iter().map(|r| r.forks_count as u64).sum();
        let total_watchers: u64 = repositories.iter().map(|r| r.watchers_count as u64).sum();

        let top_repos = top_repositories(repositories, self.top_n)
            .into_iter()
            .map(|repo| TopRepository {
                name: repo.name.clone(),
                description: repo.description().unwrap_or(NO_DESCRIPTION).to_string(),
                stars: repo.stargazers_count,
                forks: repo.forks_count,
                language: repo.language().unwrap_or(UNKNOWN_LANGUAGE).to_string(),
                url: repo.html_url.clone(),
                updated_at: repo.updated_at,
            })
            .collect();

        RepositorySummary {
            total_repos: repositories.len(),
            total_stars,
            total_forks,
            total_watchers,
            avg_stars: average(total_stars, repositories.len()),
            top_repos,
        }
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOP_REPOS_COUNT)
    }
}

/// The `n` most starred repositories, ties kept in listing order.
pub fn top_repositories(repositories: &[Repository], n: usize) -> Vec<&Repository> {
    let mut ranked: Vec<&Repository> = repositories.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.truncate(n);
    ranked
}

/// Repository count per language, most frequent first. Equal counts keep
/// the order in which the languages were first seen.
pub fn language_counts(repositories: &[Repository]) -> Vec<(String, u32)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, u32)> = Vec::new();

    for language in repositories.iter().filter_map(Repository::language) {
        match index.get(language) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(language, counts.len());
                counts.push((language.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn language_summary(repositories: &[Repository]) -> LanguageSummary {
    let counts = language_counts(repositories);
    // Percentages are relative to repositories that have a language.
    let total: u32 = counts.iter().map(|(_, count)| count).sum();

    let languages = counts
        .iter()
        .take(TOP_LANGUAGES)
        .map(|(language, count)| LanguageShare {
            language: language.clone(),
            count: *count,
            percentage: round2(*count as f64 / total as f64 * 100.0),
        })
        .collect();

    LanguageSummary {
        total_languages: counts.len(),
        languages,
    }
}

/// Whether the repository was updated strictly inside the trailing window.
pub fn is_recently_active(repository: &Repository, now: DateTime<Utc>) -> bool {
    repository.updated_at > now - Duration::days(ACTIVITY_WINDOW_DAYS)
}

pub fn activity_summary(repositories: &[Repository], now: DateTime<Utc>) -> ActivitySummary {
    let recent: Vec<&Repository> = repositories
        .iter()
        .filter(|r| is_recently_active(r, now))
        .collect();

    let mut monthly_activity: BTreeMap<String, u32> = BTreeMap::new();
    let mut weekly_activity = WeeklyActivity::default();
    for repo in &recent {
        *monthly_activity.entry(month_key(repo.updated_at)).or_insert(0) += 1;
        weekly_activity.record(repo.updated_at.weekday());
    }

    let forks = repositories.iter().filter(|r| r.fork).count();
    let recent_stars: u64 = recent.iter().map(|r| r.stargazers_count as u64).sum();

    ActivitySummary {
        active_repos_last_year: recent.len(),
        monthly_activity,
        weekly_activity,
        fork_split: ForkSplit {
            forks,
            sources: repositories.len() - forks,
        },
        avg_stars_active: average(recent_stars, recent.len()),
    }
}

/// Zero-padded `YYYY-MM`, so lexical order is chronological.
pub fn month_key(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m").to_string()
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round2(total as f64 / count as f64)
}

/// Two-decimal rounding with ties going to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
