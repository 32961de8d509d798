use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::IgnoredAny;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::provider::RepositoryProvider;
use crate::github::rate_limiter::RateLimiter;
use crate::models::{AccountData, AccountProfile, GitHubAccount, Repository};

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
    max_repos: u32,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitstats/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            max_repos: config.max_repos,
        })
    }

    pub async fn get_account(&self, login: &str) -> Result<GitHubAccount> {
        self.rate_limiter.check().await?;
        let url = format!("{}/users/{}", self.base_url, login);
        tracing::info!("Fetching account: {}", login);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update_from_response(&response).await;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::AccountNotFound(login.to_string()));
        }

        let response = ensure_success(response, &self.rate_limiter, login).await?;
        Ok(response.json().await?)
    }

    pub async fn get_account_repos(&self, login: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?type=owner&sort=full_name", self.base_url, login);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching up to {} repositories for: {}", self.max_repos, login);
        paginator.fetch_limited(&url, PER_PAGE, self.max_repos).await
    }

    pub async fn count_public_members(&self, org: &str) -> Result<u32> {
        let url = format!("{}/orgs/{}/public_members", self.base_url, org);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        let members: Vec<IgnoredAny> = paginator.fetch_all(&url, PER_PAGE).await?;
        Ok(members.len() as u32)
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl RepositoryProvider for GitHubClient {
    async fn fetch(&self, account: &str) -> Result<AccountData> {
        let raw = self.get_account(account).await?;

        let public_members = if raw.is_organization() {
            match self.count_public_members(&raw.login).await {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!("Could not count public members of {}: {}", raw.login, e);
                    None
                }
            }
        } else {
            None
        };

        let repositories = self.get_account_repos(&raw.login).await?;
        let profile = AccountProfile::from_account(raw, public_members);

        Ok(AccountData {
            profile,
            repositories,
        })
    }

    fn name(&self) -> &str {
        "github"
    }
}

/// Maps non-2xx responses onto the crate's error taxonomy.
pub(crate) async fn ensure_success(
    response: Response,
    rate_limiter: &RateLimiter,
    context: &str,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let quota_exhausted = rate_limiter.remaining().await == Some(0);
    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && quota_exhausted) {
        let retry_after = rate_limiter.retry_after().await.unwrap_or(60);
        return Err(Error::RateLimited(retry_after));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request for {} failed: {} - {}",
        context, status, body
    )))
}
