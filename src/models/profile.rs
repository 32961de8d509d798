use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for free-text profile fields the account left blank.
pub const UNKNOWN: &str = "Unknown";

/// Account payload as returned by `GET /users/{login}`.
///
/// Users and organizations share this endpoint, so every kind-specific
/// field is optional here. [`AccountProfile`] is the validated shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubAccount {
    pub login: String,
    pub id: u64,
    #[serde(rename = "type")]
    pub account_type: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

impl GitHubAccount {
    pub fn is_organization(&self) -> bool {
        self.account_type.eq_ignore_ascii_case("organization")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub login: String,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub public_repos: u32,
    pub created_at: DateTime<Utc>,
    pub location: String,
    pub blog: String,
    #[serde(flatten)]
    pub details: AccountDetails,
}

/// Fields that only exist for one kind of account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountDetails {
    User {
        followers: u32,
        following: u32,
        public_gists: u32,
        company: String,
    },
    Organization {
        email: String,
        public_members: u32,
    },
}

impl AccountProfile {
    /// Builds a profile from the raw payload. `public_members` is only
    /// consulted for organizations and defaults to 0 when unavailable.
    pub fn from_account(account: GitHubAccount, public_members: Option<u32>) -> Self {
        let details = if account.is_organization() {
            AccountDetails::Organization {
                email: or_unknown(account.email),
                public_members: public_members.unwrap_or(0),
            }
        } else {
            AccountDetails::User {
                followers: account.followers,
                following: account.following,
                public_gists: account.public_gists,
                company: or_unknown(account.company),
            }
        };

        Self {
            name: non_blank(account.name).unwrap_or_else(|| account.login.clone()),
            bio: non_blank(account.bio),
            avatar_url: account.avatar_url,
            html_url: account.html_url,
            public_repos: account.public_repos,
            created_at: account.created_at,
            location: or_unknown(account.location),
            blog: or_unknown(account.blog),
            login: account.login,
            details,
        }
    }

    pub fn is_organization(&self) -> bool {
        matches!(self.details, AccountDetails::Organization { .. })
    }

    /// Follower count; organizations do not expose one and report 0.
    pub fn followers(&self) -> u32 {
        match self.details {
            AccountDetails::User { followers, .. } => followers,
            AccountDetails::Organization { .. } => 0,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_unknown(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| UNKNOWN.to_string())
}
