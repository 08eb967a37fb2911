use chrono::{NaiveDate, Utc};
use derive_more::Constructor;
use log::debug;

use crate::api::{ContributionDay, ContributionStats, Profile, Repository};

/// Number of languages kept by the ranking.
pub const TOP_LANGUAGES: usize = 5;

/// Current and longest runs of consecutive contribution days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    pub current: u32,
    pub max: u32,
}

/// One ranked language with its share of the top-five subset, one decimal place.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: f32,
}

/// Display-ready summary of a user's public activity. Always fully populated;
/// contribution-derived fields are zero / empty when the contribution
/// sub-result was absent. Carries no timestamp so that aggregating identical
/// inputs yields equal values.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub login: String,
    pub name: String,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub total_stars: u32,
    pub total_forks: u32,
    pub total_commits: u32,
    pub total_issues: u32,
    pub total_prs: u32,
    pub streak: StreakSummary,
    pub contribution_days: Vec<ContributionDay>,
    pub languages: Vec<LanguageShare>,
}

/// Computes streaks against the current UTC date.
pub fn compute_streak(days: &[ContributionDay]) -> StreakSummary {
    compute_streak_at(days, Utc::now().date_naive())
}

/// Computes the current and longest contribution streaks.
///
/// The input is copied and stable-sorted ascending by date; duplicate dates are
/// kept and each entry counts separately in the max pass. The current streak is
/// scanned backwards from the most recent entry: a positive-count day extends
/// the streak while its whole-day offset from `today` is at most the streak
/// length plus one, and a zero-count day is skipped only within the one-day
/// grace window (today or yesterday) that covers contributions not yet posted.
/// The max pass is an independent forward scan counting runs of positive-count
/// entries by list position; calendar adjacency between entries is not checked,
/// the calendar is assumed dense.
pub fn compute_streak_at(days: &[ContributionDay], today: NaiveDate) -> StreakSummary {
    let mut days = days.to_vec();
    days.sort_by_key(|day| day.date);

    let mut current = 0u32;
    for day in days.iter().rev() {
        let offset = (today - day.date).num_days();
        if day.count > 0 {
            if offset <= i64::from(current) + 1 {
                current += 1;
            } else {
                break;
            }
        } else if offset > 1 {
            break;
        }
    }

    let mut max = 0u32;
    let mut run = 0u32;
    for day in &days {
        if day.count > 0 {
            run += 1;
            max = max.max(run);
        } else {
            run = 0;
        }
    }

    StreakSummary { current, max }
}

/// Ranks repository primary languages by repository count.
///
/// Repositories without a primary language are excluded entirely. Counts are
/// stable-sorted descending (ties keep first-encounter order), truncated to
/// [`TOP_LANGUAGES`], and each kept language's percentage is its share of the
/// kept subset's total, rounded to one decimal place.
pub fn rank_languages(repos: &[Repository]) -> Vec<LanguageShare> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for repo in repos {
        if let Some(language) = repo.language.as_deref() {
            match counts.iter_mut().find(|(name, _)| *name == language) {
                Some((_, count)) => *count += 1,
                None => counts.push((language, 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_LANGUAGES);
    let total: u32 = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(name, count)| {
            let percentage = count as f32 / total as f32 * 100.0;
            LanguageShare::new(name.to_string(), round_one_decimal(percentage))
        })
        .collect()
}

fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Aggregates against the current UTC date.
pub fn aggregate(
    profile: &Profile,
    repos: &[Repository],
    contributions: Option<&ContributionStats>,
) -> StatsSummary {
    aggregate_at(profile, repos, contributions, Utc::now().date_naive())
}

/// Folds the independently fetched sub-results into one [`StatsSummary`].
///
/// Pure and synchronous; calling it twice with identical inputs and the same
/// `today` yields equal summaries. An absent contribution sub-result zeroes
/// the contribution totals, the streaks and the day list instead of failing.
pub fn aggregate_at(
    profile: &Profile,
    repos: &[Repository],
    contributions: Option<&ContributionStats>,
    today: NaiveDate,
) -> StatsSummary {
    let total_stars = repos.iter().map(|repo| repo.stargazers).sum();
    let total_forks = repos.iter().map(|repo| repo.forks).sum();
    let languages = rank_languages(repos);

    let (total_commits, total_issues, total_prs, contribution_days) = match contributions {
        Some(stats) => (
            stats.commits,
            stats.issues,
            stats.pull_requests + stats.pull_request_reviews,
            stats.days.clone(),
        ),
        None => (0, 0, 0, Vec::new()),
    };
    let streak = compute_streak_at(&contribution_days, today);
    debug!(
        "Aggregated {} repositories and {} contribution days for {}",
        repos.len(),
        contribution_days.len(),
        profile.login
    );

    StatsSummary {
        login: profile.login.clone(),
        name: profile.name.clone().unwrap_or_else(|| profile.login.clone()),
        followers: profile.followers,
        following: profile.following,
        public_repos: profile.public_repos,
        total_stars,
        total_forks,
        total_commits,
        total_issues,
        total_prs,
        streak,
        contribution_days,
        languages,
    }
}
