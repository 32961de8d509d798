use std::collections::BTreeMap;

use chrono::{DateTime, Utc, Weekday};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::profile::AccountProfile;

#[derive(Debug, Clone, Serialize)]
pub struct AggregatedStats {
    pub profile: AccountProfile,
    pub repositories: RepositorySummary,
    pub languages: LanguageSummary,
    pub activity: ActivitySummary,
    pub charts: BTreeMap<String, Chart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositorySummary {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_watchers: u64,
    pub avg_stars: f64,
    pub top_repos: Vec<TopRepository>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRepository {
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    pub language: String,
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSummary {
    /// Distinct languages across all repositories, before the top-10 cut.
    pub total_languages: usize,
    pub languages: Vec<LanguageShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub active_repos_last_year: usize,
    /// `YYYY-MM` keys; months without updates are absent.
    pub monthly_activity: BTreeMap<String, u32>,
    pub weekly_activity: WeeklyActivity,
    pub fork_split: ForkSplit,
    pub avg_stars_active: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForkSplit {
    pub forks: usize,
    pub sources: usize,
}

/// Per-weekday counts, always holding all seven days.
///
/// Serializes as a map keyed `Monday` through `Sunday` in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyActivity([u32; 7]);

impl WeeklyActivity {
    pub const DAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn record(&mut self, day: Weekday) {
        self.0[day.num_days_from_monday() as usize] += 1;
    }

    pub fn get(&self, day: Weekday) -> u32 {
        self.0[day.num_days_from_monday() as usize]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        Self::DAYS.into_iter().map(move |day| (day_name(day), self.get(day)))
    }
}

impl Serialize for WeeklyActivity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (day, count) in self.iter() {
            map.serialize_entry(day, &count)?;
        }
        map.end()
    }
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    HorizontalBar,
    Line,
    Scatter,
}

/// Styling-free chart data, ready for a presentation layer to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}
