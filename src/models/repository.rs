use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub watchers_count: u32,
    pub fork: bool,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    /// Primary language; blank values count as none.
    pub fn language(&self) -> Option<&str> {
        non_blank(self.language.as_deref())
    }

    /// Description; blank values count as none.
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// What a provider hands to the aggregator for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub profile: super::AccountProfile,
    pub repositories: Vec<Repository>,
}
