use std::collections::BTreeMap;

use crate::analysis::aggregator::{language_counts, top_repositories};
use crate::models::{ActivitySummary, Chart, ChartKind, ChartPoint, Repository};

pub const LANGUAGES_PIE: &str = "languages_pie";
pub const TOP_REPOS_BAR: &str = "top_repos_bar";
pub const ACTIVITY_TIMELINE: &str = "activity_timeline";
pub const STARS_VS_FORKS: &str = "stars_vs_forks";

/// Produces presentation-ready charts keyed by chart name.
///
/// Charts with nothing to show are left out of the map.
pub trait ChartRenderer: Send + Sync {
    fn render(
        &self,
        repositories: &[Repository],
        activity: &ActivitySummary,
    ) -> BTreeMap<String, Chart>;
}

/// Emits the raw data series of each chart and leaves drawing to the caller.
#[derive(Debug, Clone)]
pub struct SeriesChartRenderer {
    top_n: usize,
}

impl SeriesChartRenderer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    fn languages_pie(&self, repositories: &[Repository]) -> Option<Chart> {
        let points: Vec<_> = language_counts(repositories)
            .into_iter()
            .enumerate()
            .map(|(i, (language, count))| ChartPoint {
                label: language,
                x: i as f64,
                y: count as f64,
            })
            .collect();

        non_empty(Chart {
            title: "Language distribution".to_string(),
            kind: ChartKind::Pie,
            points,
        })
    }

    fn top_repos_bar(&self, repositories: &[Repository]) -> Option<Chart> {
        let points: Vec<_> = top_repositories(repositories, self.top_n)
            .into_iter()
            .enumerate()
            .map(|(i, repo)| ChartPoint {
                label: repo.name.clone(),
                x: repo.stargazers_count as f64,
                y: i as f64,
            })
            .collect();

        non_empty(Chart {
            title: format!("Top {} repositories by stars", self.top_n),
            kind: ChartKind::HorizontalBar,
            points,
        })
    }

    fn activity_timeline(&self, activity: &ActivitySummary) -> Option<Chart> {
        let points: Vec<_> = activity
            .monthly_activity
            .iter()
            .enumerate()
            .map(|(i, (month, count))| ChartPoint {
                label: month.clone(),
                x: i as f64,
                y: *count as f64,
            })
            .collect();

        non_empty(Chart {
            title: "Repository updates over the last year".to_string(),
            kind: ChartKind::Line,
            points,
        })
    }

    fn stars_vs_forks(&self, repositories: &[Repository]) -> Option<Chart> {
        let points: Vec<_> = repositories
            .iter()
            .filter(|r| r.stargazers_count > 0)
            .map(|repo| ChartPoint {
                label: repo.name.clone(),
                x: repo.stargazers_count as f64,
                y: repo.forks_count as f64,
            })
            .collect();

        non_empty(Chart {
            title: "Stars vs forks".to_string(),
            kind: ChartKind::Scatter,
            points,
        })
    }
}

impl Default for SeriesChartRenderer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOP_REPOS_COUNT)
    }
}

impl ChartRenderer for SeriesChartRenderer {
    fn render(
        &self,
        repositories: &[Repository],
        activity: &ActivitySummary,
    ) -> BTreeMap<String, Chart> {
        [
            (LANGUAGES_PIE, self.languages_pie(repositories)),
            (TOP_REPOS_BAR, self.top_repos_bar(repositories)),
            (ACTIVITY_TIMELINE, self.activity_timeline(activity)),
            (STARS_VS_FORKS, self.stars_vs_forks(repositories)),
        ]
        .into_iter()
        .filter_map(|(name, chart)| chart.map(|c| (name.to_string(), c)))
        .collect()
    }
}

fn non_empty(chart: Chart) -> Option<Chart> {
    (!chart.points.is_empty()).then_some(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::activity_summary;
    use crate::analysis::testing::{now, repo};
    use chrono::Duration;

    #[test]
    fn test_no_repositories_renders_nothing() {
        let charts = SeriesChartRenderer::default().render(&[], &activity_summary(&[], now()));
        assert!(charts.is_empty());
    }

    #[test]
    fn test_all_charts_present() {
        let repos = vec![repo("a", 3, Some("Rust")), repo("b", 0, Some("Go"))];
        let charts = SeriesChartRenderer::new(5).render(&repos, &activity_summary(&repos, now()));

        let names: Vec<&str> = charts.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![ACTIVITY_TIMELINE, LANGUAGES_PIE, STARS_VS_FORKS, TOP_REPOS_BAR]
        );
        assert_eq!(charts[STARS_VS_FORKS].points.len(), 1);
        assert_eq!(charts[TOP_REPOS_BAR].points[0].label, "a");
        assert_eq!(charts[TOP_REPOS_BAR].title, "Top 5 repositories by stars");
    }

    #[test]
    fn test_charts_without_data_are_omitted() {
        let mut stale = repo("stale", 0, None);
        stale.updated_at = now() - Duration::days(800);
        let repos = vec![stale];
        let charts = SeriesChartRenderer::default().render(&repos, &activity_summary(&repos, now()));

        assert!(!charts.contains_key(LANGUAGES_PIE));
        assert!(!charts.contains_key(STARS_VS_FORKS));
        assert!(!charts.contains_key(ACTIVITY_TIMELINE));
        assert!(charts.contains_key(TOP_REPOS_BAR));
    }
}
