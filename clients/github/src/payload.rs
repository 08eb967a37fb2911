use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for stats_card::api::Profile {
    fn from(user: User) -> Self {
        stats_card::api::Profile {
            login: user.login,
            name: user.name,
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub language: Option<String>,
}

impl From<Repo> for stats_card::api::Repository {
    fn from(repo: Repo) -> Self {
        stats_card::api::Repository::new(repo.name, repo.stargazers_count, repo.forks_count, repo.language)
    }
}

#[derive(Deserialize, Debug)]
pub struct GraphQlResponse {
    pub data: Option<ContributionsData>,
    pub errors: Option<Value>,
}

#[derive(Deserialize, Debug)]
pub struct ContributionsData {
    pub user: Option<ContributionsUser>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
    #[serde(default)]
    pub total_commit_contributions: u32,
    #[serde(default)]
    pub total_issue_contributions: u32,
    #[serde(default)]
    pub total_pull_request_contributions: u32,
    #[serde(default)]
    pub total_pull_request_review_contributions: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u32,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

impl From<ContributionsCollection> for stats_card::api::ContributionStats {
    fn from(collection: ContributionsCollection) -> Self {
        // Weeks flattened to the single day sequence the streak calculator expects.
        let days = collection
            .contribution_calendar
            .weeks
            .into_iter()
            .flat_map(|week| week.contribution_days)
            .map(|day| stats_card::api::ContributionDay::new(day.date, day.contribution_count))
            .collect();
        stats_card::api::ContributionStats {
            total_contributions: collection.contribution_calendar.total_contributions,
            commits: collection.total_commit_contributions,
            issues: collection.total_issue_contributions,
            pull_requests: collection.total_pull_request_contributions,
            pull_request_reviews: collection.total_pull_request_review_contributions,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats_card::api::ContributionStats;

    #[test]
    fn contribution_calendar_flattens_weeks() {
        let body = r#"{
            "data": {
                "user": {
                    "contributionsCollection": {
                        "totalCommitContributions": 12,
                        "totalIssueContributions": 3,
                        "totalPullRequestContributions": 4,
                        "totalPullRequestReviewContributions": 2,
                        "contributionCalendar": {
                            "totalContributions": 21,
                            "weeks": [
                                { "contributionDays": [
                                    { "date": "2024-05-05", "contributionCount": 0 },
                                    { "date": "2024-05-06", "contributionCount": 7 }
                                ]},
                                { "contributionDays": [
                                    { "date": "2024-05-12", "contributionCount": 14 }
                                ]}
                            ]
                        }
                    }
                }
            }
        }"#;
        let response: GraphQlResponse = serde_json::from_str(body).unwrap();
        assert!(response.errors.is_none());
        let stats: ContributionStats = response
            .data
            .unwrap()
            .user
            .unwrap()
            .contributions_collection
            .into();
        assert_eq!(stats.total_contributions, 21);
        assert_eq!(stats.commits, 12);
        assert_eq!(stats.pull_requests + stats.pull_request_reviews, 6);
        assert_eq!(stats.days.len(), 3);
        assert_eq!(stats.days[1].count, 7);
    }

    #[test]
    fn repo_counts_default_when_missing() {
        let repo: Repo = serde_json::from_str(r#"{ "name": "empty", "language": null }"#).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert!(repo.language.is_none());
    }
}
