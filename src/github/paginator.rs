use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::ensure_success;
use crate::github::rate_limiter::RateLimiter;

pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
    ) -> Result<Vec<T>> {
        self.fetch_limited(base_url, per_page, u32::MAX).await
    }

    /// Follows `rel="next"` links until `max_items` are collected, then
    /// truncates to exactly `max_items`.
    pub async fn fetch_limited<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_items: u32,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        if max_items == 0 {
            return Ok(all_items);
        }

        loop {
            self.rate_limiter.check().await?;

            let url = page_url(base_url, per_page, page);
            tracing::debug!("Fetching: {}", url);
            let response = self.client.get(&url).send().await?;
            self.rate_limiter.update_from_response(&response).await;
            let response = ensure_success(response, self.rate_limiter, &url).await?;

            let has_next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(has_next_link)
                .unwrap_or(false);

            let items: Vec<T> = response.json().await?;
            let items_count = items.len();
            all_items.extend(items);

            if all_items.len() >= max_items as usize || !has_next || items_count < per_page as usize
            {
                break;
            }

            page += 1;
        }

        all_items.truncate(max_items as usize);
        Ok(all_items)
    }
}

fn page_url(base_url: &str, per_page: u32, page: u32) -> String {
    let separator = if base_url.contains('?') { "&" } else { "?" };
    format!("{}{}per_page={}&page={}", base_url, separator, per_page, page)
}

fn has_next_link(link: &str) -> bool {
    link.contains("rel=\"next\"")
}
