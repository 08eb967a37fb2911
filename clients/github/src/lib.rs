use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use stats_card::api::{ContributionStats, Error, Profile, Repository, Result, StatsClient};

mod builder;
mod payload;
mod retry;

pub use builder::GithubClientBuilder;
pub use retry::Backoff;

const MAX_REPOS_PAGE: u32 = 100;
const FIRST_PAGE_NUMBER: u32 = 1;

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}"#;

pub struct GithubClient {
    client: Client,
    api_url: String,
    backoff: Backoff,
    authenticated: bool,
}

impl GithubClient {
    /// Sends the request, retrying transient failures (transport errors, 5xx,
    /// plain 429) per the configured [`Backoff`] schedule. Not-found and
    /// exhausted-quota responses are fatal immediately.
    async fn send_with_retry(&self, request: RequestBuilder, login: &str) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let cloned = request
                .try_clone()
                .ok_or_else(|| anyhow::anyhow!("request is not cloneable"))?;
            match cloned.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(Error::UserNotFound(login.to_string()));
                    }
                    if let Some(reset) = rate_limit_reset(response.headers()) {
                        return Err(Error::RateLimited { reset });
                    }
                    let transient = status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                    if transient {
                        if let Some(delay) = self.backoff.delay_after(attempt) {
                            warn!("Request failed with status {}, retrying in {:?}", status, delay);
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                    }
                    let detail = response.text().await.unwrap_or_default();
                    return Err(Error::Status {
                        status: status.as_u16(),
                        detail,
                    });
                }
                Err(err) => {
                    if let Some(delay) = self.backoff.delay_after(attempt) {
                        warn!("Transport error: {}, retrying in {:?}", err, delay);
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(other(err));
                }
            }
        }
    }
}

#[async_trait]
impl StatsClient for GithubClient {
    async fn profile(&self, login: &str) -> Result<Profile> {
        let request = self.client.get(format!("{}/users/{}", self.api_url, login));
        let response = self.send_with_retry(request, login).await?;
        let user = response.json::<payload::User>().await.map_err(other)?;
        Ok(user.into())
    }

    async fn repositories(&self, login: &str) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();
        let mut page = FIRST_PAGE_NUMBER;
        loop {
            let request = self
                .client
                .get(format!("{}/users/{}/repos", self.api_url, login))
                .query(&[("per_page", MAX_REPOS_PAGE.to_string()), ("page", page.to_string())]);
            let response = self.send_with_retry(request, login).await?;
            let batch = response.json::<Vec<payload::Repo>>().await.map_err(other)?;
            debug!("Found {} repositories on page {}", batch.len(), page);
            let short_page = (batch.len() as u32) < MAX_REPOS_PAGE;
            repos.extend(batch.into_iter().map(Repository::from));
            if short_page {
                return Ok(repos);
            }
            page += 1;
        }
    }

    async fn contributions(&self, login: &str) -> Result<Option<ContributionStats>> {
        if !self.authenticated {
            warn!("No API token configured, skipping the contribution calendar");
            return Ok(None);
        }
        let body = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "login": login },
        });
        let request = self.client.post(format!("{}/graphql", self.api_url)).json(&body);
        let response = self.send_with_retry(request, login).await?;
        let body = response.json::<payload::GraphQlResponse>().await.map_err(other)?;
        if let Some(errors) = body.errors {
            return Err(other(anyhow::anyhow!("GraphQL reported errors: {errors}")));
        }
        let user = body
            .data
            .and_then(|data| data.user)
            .ok_or_else(|| Error::UserNotFound(login.to_string()))?;
        Ok(Some(user.contributions_collection.into()))
    }
}

pub(crate) fn other<E: Into<anyhow::Error>>(err: E) -> Error {
    Error::Other(err.into())
}

/// Exhausted-quota detection per GitHub convention: 403/429 responses carry
/// `x-ratelimit-remaining: 0` and the reset epoch in `x-ratelimit-reset`.
fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?;
    if remaining != "0" {
        return None;
    }
    let reset = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;
    Utc.timestamp_opt(reset, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn reset_time_parsed_when_quota_exhausted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1714569000"));
        let reset = rate_limit_reset(&headers).unwrap();
        assert_eq!(reset.timestamp(), 1714569000);
    }

    #[test]
    fn remaining_quota_is_not_rate_limited() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("12"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1714569000"));
        assert!(rate_limit_reset(&headers).is_none());
    }

    #[test]
    fn missing_headers_are_not_rate_limited() {
        assert!(rate_limit_reset(&HeaderMap::new()).is_none());
    }
}
