pub mod args;
pub mod render;

use args::Args;
use chrono::Utc;
use futures::try_join;
use github_client::{Backoff, GithubClientBuilder};
use log::info;
use stats_card::api::{Result, StatsClient};
use stats_card::summary::{aggregate_at, StatsSummary};
use std::time::Duration;

/// Builds the client, issues the three independent fetches concurrently and
/// folds the joined results into a summary. Any fetch failure fails the whole
/// batch; there is no partial output.
pub async fn generate_summary(args: &Args) -> Result<StatsSummary> {
    let mut builder = GithubClientBuilder::default()
        .with_api_url(&args.api_url)
        .with_backoff(Backoff::new(args.max_attempts, Duration::from_millis(500), 2));
    if let Some(token) = &args.api_token {
        builder = builder.try_with_token(token.clone())?;
    }
    let client = builder.build()?;

    info!("Fetching stats for {}", args.username);
    let (profile, repos, contributions) = try_join!(
        client.profile(&args.username),
        client.repositories(&args.username),
        client.contributions(&args.username),
    )?;

    Ok(aggregate_at(
        &profile,
        &repos,
        contributions.as_ref(),
        Utc::now().date_naive(),
    ))
}
