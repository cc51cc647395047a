use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PROFILE_TABLE: &str = "perfil";
const DEFAULT_ASSETS_DIR: &str = "public";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub profile_table: String,
    pub port: u16,
    pub assets_dir: PathBuf,
    pub fetch_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            supabase_url: require_env("SUPABASE_URL")?,
            supabase_anon_key: require_env("SUPABASE_ANON_KEY")?,
            profile_table: optional_env("PROFILE_TABLE")
                .unwrap_or_else(|| DEFAULT_PROFILE_TABLE.to_string()),
            port: parse_port(optional_env("PORT").as_deref())?,
            assets_dir: optional_env("ASSETS_DIR")
                .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string())
                .into(),
            fetch_timeout: Duration::from_secs(match optional_env("FETCH_TIMEOUT_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
                None => DEFAULT_FETCH_TIMEOUT_SECS,
            }),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .context("PORT must be a valid port number"),
        None => Ok(DEFAULT_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), 3000);
    }

    #[test]
    fn test_port_parses_value() {
        assert_eq!(parse_port(Some("8080")).unwrap(), 8080);
    }

    #[test]
    fn test_port_rejects_garbage() {
        assert!(parse_port(Some("not-a-port")).is_err());
        assert!(parse_port(Some("70000")).is_err());
    }
}
