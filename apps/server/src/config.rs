//! Server configuration read from the environment.

use anyhow::{bail, Context};

/// Runtime settings. Every field has a default so an empty environment works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    /// Used when a start request does not say whether to shuffle.
    pub shuffle_by_default: bool,
    /// Sessions untouched for this long are dropped when a new one is created.
    pub session_idle_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: "info".to_string(),
            shuffle_by_default: false,
            session_idle_minutes: 120,
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `RUST_LOG`, `SHUFFLE_BY_DEFAULT` and
    /// `SESSION_IDLE_MINUTES`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {value:?}"))?,
            None => defaults.port,
        };

        let shuffle_by_default = match lookup("SHUFFLE_BY_DEFAULT") {
            Some(value) => parse_flag(&value)
                .with_context(|| format!("SHUFFLE_BY_DEFAULT must be true or false, got {value:?}"))?,
            None => defaults.shuffle_by_default,
        };

        let session_idle_minutes = match lookup("SESSION_IDLE_MINUTES") {
            Some(value) => {
                let minutes = value.parse::<u32>().with_context(|| {
                    format!("SESSION_IDLE_MINUTES must be a whole number, got {value:?}")
                })?;
                if minutes == 0 {
                    bail!("SESSION_IDLE_MINUTES must be at least 1");
                }
                minutes
            }
            None => defaults.session_idle_minutes,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            shuffle_by_default,
            session_idle_minutes,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_idle_minutes))
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("unrecognized flag"),
    }
}
