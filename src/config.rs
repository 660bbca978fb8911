// src/config.rs

use crate::domain::SearchQuery;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CITIES: &[&str] = &["den-haag", "rotterdam", "utrecht", "amsterdam", "lieden", "delft"];
pub const DEFAULT_PRICE_RANGE: &str = "0-1750";
pub const DEFAULT_BEDROOMS: &str = "2-slaapkamers";
pub const DEFAULT_NEW_FILTER: &str = "sinds-1"; // posted within the last hour
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_STATE_FILE: &str = "seen_listings.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// How far a failure reaches inside one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultIsolation {
    /// A failing query only ends that query; the rest still run.
    #[default]
    PerQuery,
    /// The first failure abandons the remainder of the iteration, including
    /// the end-of-iteration save.
    PerIteration,
}

impl FromStr for FaultIsolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-query" | "query" => Ok(FaultIsolation::PerQuery),
            "per-iteration" | "iteration" => Ok(FaultIsolation::PerIteration),
            other => Err(format!("unknown isolation mode '{other}'")),
        }
    }
}

/// Everything the watcher needs, resolved once at startup.
#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    pub chat_id: i64,
    pub state_file: PathBuf,
    pub check_interval: Duration,
    pub queries: Vec<SearchQuery>,
    pub isolation: FaultIsolation,
    pub outreach_signature: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("state_file", &self.state_file)
            .field("check_interval", &self.check_interval)
            .field("queries", &self.queries)
            .field("isolation", &self.isolation)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let telegram_token = var("TELEGRAM_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        let chat_id = var("CHAT_ID")
            .ok_or(ConfigError::Missing("CHAT_ID"))?
            .parse::<i64>()
            .map_err(|e| ConfigError::Invalid {
                key: "CHAT_ID",
                reason: e.to_string(),
            })?;

        let check_interval_secs = match var("CHECK_INTERVAL_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "CHECK_INTERVAL_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_CHECK_INTERVAL_SECS,
        };
        if check_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "CHECK_INTERVAL_SECS",
                reason: "must be at least 1".into(),
            });
        }

        let isolation = match var("FAULT_ISOLATION") {
            Some(raw) => raw.parse::<FaultIsolation>().map_err(|reason| ConfigError::Invalid {
                key: "FAULT_ISOLATION",
                reason,
            })?,
            None => FaultIsolation::default(),
        };

        let cities: Vec<String> = match var("CITIES") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
        };
        if cities.is_empty() {
            return Err(ConfigError::Invalid {
                key: "CITIES",
                reason: "no cities listed".into(),
            });
        }

        let price_range = var("PRICE_RANGE").unwrap_or_else(|| DEFAULT_PRICE_RANGE.to_string());
        let bedrooms = var("BEDROOMS").unwrap_or_else(|| DEFAULT_BEDROOMS.to_string());
        let recency = var("NEW_FILTER").unwrap_or_else(|| DEFAULT_NEW_FILTER.to_string());

        let queries = cities
            .into_iter()
            .map(|city| SearchQuery::new(city, price_range.as_str(), bedrooms.as_str(), recency.as_str()))
            .collect();

        Ok(Self {
            telegram_token,
            chat_id,
            state_file: var("STATE_FILE")
                .unwrap_or_else(|| DEFAULT_STATE_FILE.to_string())
                .into(),
            check_interval: Duration::from_secs(check_interval_secs),
            queries,
            isolation,
            outreach_signature: var("OUTREACH_SIGNATURE")
                .map(|s| s.replace("\\n", "\n"))
                .unwrap_or_default(),
        })
    }
}
