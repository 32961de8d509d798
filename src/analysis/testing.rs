//! Fixtures shared by the analysis tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::analysis::StatsAggregator;
use crate::models::{AccountDetails, AccountProfile, AggregatedStats, Repository};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub fn profile(login: &str, followers: u32) -> AccountProfile {
    AccountProfile {
        login: login.to_string(),
        name: login.to_string(),
        bio: None,
        avatar_url: format!("https://avatars.example/{}", login),
        html_url: format!("https://github.com/{}", login),
        public_repos: 0,
        created_at: Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap(),
        location: "Unknown".to_string(),
        blog: "Unknown".to_string(),
        details: AccountDetails::User {
            followers,
            following: 0,
            public_gists: 0,
            company: "Unknown".to_string(),
        },
    }
}

pub fn repo(name: &str, stars: u32, language: Option<&str>) -> Repository {
    Repository {
        name: name.to_string(),
        description: None,
        language: language.map(str::to_string),
        stargazers_count: stars,
        forks_count: stars / 2,
        watchers_count: stars,
        fork: false,
        html_url: format!("https://github.com/octo/{}", name),
        created_at: now() - Duration::days(900),
        updated_at: now() - Duration::days(10),
    }
}

pub fn stats(login: &str, followers: u32, repositories: &[Repository]) -> AggregatedStats {
    StatsAggregator::default().aggregate_at(profile(login, followers), repositories, now())
}
