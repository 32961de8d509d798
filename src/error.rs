use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid account name: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of failures as seen by callers of the stats service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    Transport,
    Validation,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AccountNotFound(_) => ErrorKind::NotFound,
            Error::RateLimited(_) => ErrorKind::RateLimited,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::GitHubApi(_) | Error::Network(_) | Error::InvalidHeader(_) => {
                ErrorKind::Transport
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::AccountNotFound("ghost".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::RateLimited(30).kind(), ErrorKind::RateLimited);
        assert_eq!(Error::GitHubApi("502".into()).kind(), ErrorKind::Transport);
        assert_eq!(Error::Validation("empty".into()).kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_retryable() {
        assert!(Error::RateLimited(10).is_retryable());
        assert!(!Error::AccountNotFound("ghost".into()).is_retryable());
        assert_eq!(
            Error::RateLimited(42).to_string(),
            "Rate limit exceeded, retry after 42 seconds"
        );
    }
}
