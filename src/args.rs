use crate::render::Theme;
use clap::Parser;
use log::LevelFilter;
use secrecy::SecretString;
use std::path::PathBuf;
use std::{fmt::Display, str::FromStr};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub login to fetch activity for
    #[clap(short, long, env = "GITHUB_USERNAME")]
    pub username: String,

    /// API OAuth access token, required for the contribution calendar
    #[clap(short, long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// Path of the generated SVG
    #[clap(short, long, env = "OUTPUT_FILE", default_value = "github-stats.svg")]
    pub output: PathBuf,

    /// Card color theme
    #[clap(short, long, env, default_value = "dark")]
    pub theme: Theme,

    /// Log verbosity, resolved once at startup
    #[clap(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Maximal request attempts before a transient failure becomes fatal
    #[clap(long, env, default_value_t = 3, parse(try_from_str=max_attempts_in_range))]
    pub max_attempts: u32,
}

fn max_attempts_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, 10, "max_attempts".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}
