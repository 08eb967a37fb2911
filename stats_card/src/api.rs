use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Constructor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("API rate limit exceeded, resets at {reset}")]
    RateLimited { reset: DateTime<Utc> },
    #[error("Request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One calendar date paired with the number of contributions recorded on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

/// Public profile counts. Counts default to zero when the upstream record omits them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Repository {
    pub name: String,
    pub stargazers: u32,
    pub forks: u32,
    /// Primary language as reported upstream, absent for e.g. empty repositories.
    pub language: Option<String>,
}

/// Contribution totals plus the flattened contribution calendar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionStats {
    pub total_contributions: u32,
    pub commits: u32,
    pub issues: u32,
    pub pull_requests: u32,
    pub pull_request_reviews: u32,
    pub days: Vec<ContributionDay>,
}

/// Fetch layer contract. The three operations are independent and are issued
/// concurrently by the pipeline; any failure fails the whole batch.
#[async_trait]
pub trait StatsClient: Send + Sync {
    async fn profile(&self, login: &str) -> Result<Profile>;

    async fn repositories(&self, login: &str) -> Result<Vec<Repository>>;

    /// Contribution calendar and totals. `Ok(None)` when the client cannot
    /// query them at all (the GraphQL endpoint requires a token); the
    /// aggregator then falls back to zeroed fields.
    async fn contributions(&self, login: &str) -> Result<Option<ContributionStats>>;
}
