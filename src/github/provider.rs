use async_trait::async_trait;

use crate::error::Result;
use crate::models::AccountData;

/// Source of profile and repository data for an account.
///
/// Implementations return at most their configured number of repositories,
/// and report failures as [`Error::AccountNotFound`], [`Error::RateLimited`]
/// or a transport error.
///
/// [`Error::AccountNotFound`]: crate::Error::AccountNotFound
/// [`Error::RateLimited`]: crate::Error::RateLimited
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    async fn fetch(&self, account: &str) -> Result<AccountData>;
    fn name(&self) -> &str;
}
