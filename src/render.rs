//! SVG stats card rendering. Consumes a fully populated summary plus the
//! render timestamp; never touches the network.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use stats_card::api::ContributionDay;
use stats_card::summary::StatsSummary;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

const CARD_WIDTH: u32 = 800;
const CARD_HEIGHT: u32 = 600;
const LANG_BAR_WIDTH: f32 = 280.0;
const HEATMAP_WEEKS: i64 = 12;
const SQUARE_SIZE: i64 = 8;
const SQUARE_GAP: i64 = 4;

#[derive(Clone, Copy, Debug, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg_start: &'static str,
    pub bg_end: &'static str,
    pub card_bg: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg_start: "#0d1117",
                bg_end: "#161b22",
                card_bg: "rgba(22, 27, 34, 0.8)",
                primary: "#58a6ff",
                secondary: "#f778ba",
                accent: "#7ee787",
                text: "#c9d1d9",
                text_secondary: "#8b949e",
                border: "rgba(88, 166, 255, 0.2)",
            },
            Theme::Light => ThemeColors {
                bg_start: "#ffffff",
                bg_end: "#f6f8fa",
                card_bg: "rgba(246, 248, 250, 0.8)",
                primary: "#0366d6",
                secondary: "#d73a49",
                accent: "#28a745",
                text: "#24292f",
                text_secondary: "#6a737d",
                border: "rgba(3, 102, 214, 0.2)",
            },
        }
    }
}

fn language_color(name: &str) -> &'static str {
    match name {
        "Python" => "#3572A5",
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Java" => "#b07219",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "C++" => "#f34b7d",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Swift" => "#ffac45",
        _ => "#858585",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// 1234567 -> "1,234,567"
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn stat_tile(x: u32, label: &str, value: &str, colors: &ThemeColors) -> String {
    let center = x + 85;
    format!(
        r#"  <g class="stat-card">
    <rect x="{x}" y="80" width="170" height="100" fill="{card_bg}" stroke="{border}" stroke-width="1.5" rx="12" opacity="0.9"/>
    <text x="{center}" y="110" text-anchor="middle" class="stat-label">{label}</text>
    <text x="{center}" y="145" text-anchor="middle" class="stat-value">{value}</text>
  </g>
"#,
        card_bg = colors.card_bg,
        border = colors.border,
    )
}

fn language_bars(summary: &StatsSummary, colors: &ThemeColors) -> String {
    let mut out = String::new();
    let mut y = 270;
    for share in &summary.languages {
        let bar_width = share.percentage / 100.0 * LANG_BAR_WIDTH;
        out.push_str(&format!(
            r#"  <text x="430" y="{y}" class="lang-name">{name}</text>
  <text x="740" y="{y}" text-anchor="end" class="lang-percent">{pct:.1}%</text>
  <rect x="430" y="{bar_y}" width="{total}" height="8" fill="rgba(139, 148, 158, 0.2)" rx="4"/>
  <rect x="430" y="{bar_y}" width="{bar_width:.1}" height="8" fill="{color}" rx="4"/>
"#,
            name = escape_xml(&share.name),
            pct = share.percentage,
            bar_y = y + 8,
            total = LANG_BAR_WIDTH,
            color = language_color(&share.name),
        ));
        y += 50;
    }
    out
}

/// 12-week heat map of the supplied contribution days, most recent week last.
/// Square opacity scales with the day's count relative to the window maximum.
fn activity_squares(days: &[ContributionDay], today: NaiveDate, accent: &str) -> String {
    let window = HEATMAP_WEEKS * 7;
    let start = today - Duration::days(window - 1);
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for day in days {
        if day.date >= start && day.date <= today {
            let entry = counts.entry(day.date).or_insert(0);
            *entry = (*entry).max(day.count);
        }
    }
    let max_count = counts.values().copied().max().unwrap_or(0);

    let mut out = String::new();
    for week in 0..HEATMAP_WEEKS {
        for dow in 0..7 {
            let date = start + Duration::days(week * 7 + dow);
            let count = counts.get(&date).copied().unwrap_or(0);
            let intensity = if max_count == 0 {
                0.0
            } else {
                count as f32 / max_count as f32
            };
            let opacity = 0.15 + intensity * 0.85;
            let x = 60 + week * (SQUARE_SIZE + SQUARE_GAP);
            let y = 450 + dow * (SQUARE_SIZE + SQUARE_GAP);
            out.push_str(&format!(
                "  <rect x=\"{x}\" y=\"{y}\" width=\"{s}\" height=\"{s}\" fill=\"{accent}\" opacity=\"{opacity:.2}\" rx=\"2\"/>\n",
                s = SQUARE_SIZE,
            ));
        }
    }
    out
}

pub fn generate_svg(summary: &StatsSummary, theme: Theme, generated_at: DateTime<Utc>) -> String {
    let colors = theme.colors();
    let name = escape_xml(&summary.name);

    let mut svg = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{CARD_WIDTH}" height="{CARD_HEIGHT}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="bgGradient" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:{bg_start};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{bg_end};stop-opacity:1" />
    </linearGradient>
    <linearGradient id="titleGradient" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:{primary};stop-opacity:1" />
      <stop offset="50%" style="stop-color:{secondary};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{accent};stop-opacity:1" />
    </linearGradient>
    <style>
      .header {{ font: 600 28px 'Segoe UI', Ubuntu, sans-serif; fill: url(#titleGradient); }}
      .stat-label {{ font: 400 14px 'Segoe UI', Ubuntu, sans-serif; fill: {text_secondary}; }}
      .stat-value {{ font: 700 24px 'Segoe UI', Ubuntu, sans-serif; fill: {text}; }}
      .lang-name {{ font: 500 13px 'Segoe UI', Ubuntu, sans-serif; fill: {text}; }}
      .lang-percent {{ font: 600 12px 'Segoe UI', Ubuntu, sans-serif; fill: {text_secondary}; }}
      .section-title {{ font: 600 18px 'Segoe UI', Ubuntu, sans-serif; fill: {primary}; }}
    </style>
  </defs>

  <rect width="{CARD_WIDTH}" height="{CARD_HEIGHT}" fill="url(#bgGradient)" rx="10"/>

  <text x="40" y="50" class="header">{name}'s GitHub Stats</text>

"#,
        bg_start = colors.bg_start,
        bg_end = colors.bg_end,
        primary = colors.primary,
        secondary = colors.secondary,
        accent = colors.accent,
        text = colors.text,
        text_secondary = colors.text_secondary,
    );

    svg.push_str(&stat_tile(40, "Total Commits", &group_thousands(summary.total_commits), &colors));
    svg.push_str(&stat_tile(220, "Repositories", &summary.public_repos.to_string(), &colors));
    svg.push_str(&stat_tile(400, "Total Stars", &group_thousands(summary.total_stars), &colors));
    svg.push_str(&stat_tile(580, "Followers", &summary.followers.to_string(), &colors));

    svg.push_str(&format!(
        r#"
  <text x="40" y="220" class="section-title">Contribution Streaks</text>
  <rect x="40" y="235" width="350" height="120" fill="{card_bg}" stroke="{border}" stroke-width="1.5" rx="12" opacity="0.9"/>
  <text x="60" y="270" class="stat-label">Current Streak</text>
  <text x="60" y="300" class="stat-value" fill="{accent}">{current} days</text>
  <text x="60" y="330" class="stat-label">Longest Streak</text>
  <text x="60" y="360" class="stat-value" fill="{secondary}">{max} days</text>

  <text x="410" y="220" class="section-title">Top Languages</text>
  <rect x="410" y="235" width="350" height="310" fill="{card_bg}" stroke="{border}" stroke-width="1.5" rx="12" opacity="0.9"/>
"#,
        card_bg = colors.card_bg,
        border = colors.border,
        accent = colors.accent,
        secondary = colors.secondary,
        current = summary.streak.current,
        max = summary.streak.max,
    ));

    svg.push_str(&language_bars(summary, &colors));

    svg.push_str(&format!(
        r#"
  <text x="40" y="385" class="section-title">Recent Activity</text>
  <rect x="40" y="400" width="350" height="145" fill="{card_bg}" stroke="{border}" stroke-width="1.5" rx="12" opacity="0.9"/>
  <text x="60" y="430" class="stat-label">Contribution Graph</text>
"#,
        card_bg = colors.card_bg,
        border = colors.border,
    ));

    svg.push_str(&activity_squares(
        &summary.contribution_days,
        generated_at.date_naive(),
        colors.accent,
    ));

    svg.push_str(&format!(
        r#"
  <text x="400" y="580" text-anchor="middle" class="stat-label">Generated on {date} for @{login}</text>
</svg>
"#,
        date = generated_at.format("%Y-%m-%d"),
        login = escape_xml(&summary.login),
    ));

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats_card::api::ContributionDay;
    use stats_card::summary::{LanguageShare, StreakSummary};

    fn sample_summary() -> StatsSummary {
        StatsSummary {
            login: "octocat".to_string(),
            name: "The <Octocat>".to_string(),
            followers: 1200,
            following: 3,
            public_repos: 42,
            total_stars: 1234567,
            total_forks: 12,
            total_commits: 987,
            total_issues: 3,
            total_prs: 8,
            streak: StreakSummary { current: 4, max: 17 },
            contribution_days: vec![ContributionDay::new("2024-05-09".parse().unwrap(), 5)],
            languages: vec![
                LanguageShare::new("Rust".to_string(), 62.5),
                LanguageShare::new("Go".to_string(), 37.5),
            ],
        }
    }

    #[test]
    fn card_contains_stats_and_streaks() {
        let generated_at = "2024-05-10T12:00:00Z".parse().unwrap();
        let svg = generate_svg(&sample_summary(), Theme::Dark, generated_at);
        assert!(svg.contains("Current Streak"));
        assert!(svg.contains(">4 days<"));
        assert!(svg.contains(">17 days<"));
        assert!(svg.contains("1,234,567"));
        assert!(svg.contains("62.5%"));
        assert!(svg.contains("Generated on 2024-05-10"));
    }

    #[test]
    fn user_supplied_strings_are_escaped() {
        let generated_at = "2024-05-10T12:00:00Z".parse().unwrap();
        let svg = generate_svg(&sample_summary(), Theme::Light, generated_at);
        assert!(svg.contains("The &lt;Octocat&gt;'s GitHub Stats"));
        assert!(!svg.contains("<Octocat>"));
    }

    #[test]
    fn theme_parses_from_cli_value() {
        assert!(matches!("dark".parse::<Theme>(), Ok(Theme::Dark)));
        assert!(matches!("light".parse::<Theme>(), Ok(Theme::Light)));
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn heatmap_covers_the_full_window_without_data() {
        let squares = activity_squares(&[], "2024-05-10".parse().unwrap(), "#7ee787");
        assert_eq!(squares.matches("<rect").count(), 84);
        assert!(squares.contains("opacity=\"0.15\""));
    }
}
