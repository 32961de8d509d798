use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::Response;
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// Tracks the GitHub quota reported in response headers.
///
/// Once the quota is known to be exhausted, `check` fails with
/// [`Error::RateLimited`] until the reset time instead of sending requests
/// that are bound to be rejected.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
            }),
        }
    }

    pub async fn check(&self) -> Result<()> {
        let state = self.state.lock().await;

        if state.remaining == Some(0) {
            if let Some(reset_at) = state.reset_at {
                let now = Instant::now();
                if reset_at > now {
                    let wait = (reset_at - now).as_secs().max(1);
                    tracing::warn!("GitHub quota exhausted, resets in {}s", wait);
                    return Err(Error::RateLimited(wait));
                }
            }
        }

        Ok(())
    }

    pub async fn update_from_response(&self, response: &Response) {
        let headers = response.headers();
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());
        let reset = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let Some(remaining) = remaining else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = Some(remaining);
        state.reset_at = reset.and_then(reset_instant);
        tracing::debug!("GitHub quota remaining: {}", remaining);
    }

    pub async fn remaining(&self) -> Option<u32> {
        self.state.lock().await.remaining
    }

    /// Seconds until the quota resets, if a reset time is known.
    pub async fn retry_after(&self) -> Option<u64> {
        let state = self.state.lock().await;
        state
            .reset_at
            .map(|reset_at| reset_at.saturating_duration_since(Instant::now()).as_secs())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn reset_instant(reset_timestamp: u64) -> Option<Instant> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    (reset_timestamp > now).then(|| Instant::now() + Duration::from_secs(reset_timestamp - now))
}
