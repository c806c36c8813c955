use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use pullboard_extract::SourceUrls;

/// Server settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub sources: SourceUrls,
    pub fetch_timeout: Duration,
    pub enable_wipe: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SourceUrls::default();

        let port: u16 = match lookup("PULLBOARD_PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PULLBOARD_PORT '{raw}'"))?,
            None => 3000,
        };
        let fetch_timeout_secs: u64 = match lookup("PULLBOARD_FETCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PULLBOARD_FETCH_TIMEOUT_SECS '{raw}'"))?,
            None => 30,
        };
        let enable_wipe = lookup("PULLBOARD_ENABLE_WIPE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            db_path: lookup("PULLBOARD_DB_PATH")
                .unwrap_or_else(|| "pullboard.db".into())
                .into(),
            host: lookup("PULLBOARD_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            sources: SourceUrls {
                primary: lookup("PULLBOARD_SOURCE_PRIMARY_URL").unwrap_or(defaults.primary),
                secondary: lookup("PULLBOARD_SOURCE_SECONDARY_URL").unwrap_or(defaults.secondary),
            },
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            enable_wipe,
        })
    }
}
