use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::assessment::matcher::DEFAULT_TOP_N;

/// Application configuration loaded from environment variables.
/// Everything has a default except the optional collaborators, which fall back
/// to in-process implementations when unset.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres for assessments and sessions. `None` → in-memory store.
    pub database_url: Option<String>,
    /// Generative-text API key. `None` → narratives always use templates.
    pub llm_api_key: Option<String>,
    pub narrative_timeout: Duration,
    pub default_top_n: i64,
    /// `token=user` pairs accepted when no database is configured.
    pub dev_bearer_tokens: Vec<(String, String)>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_top_n = parse_top_n(optional_env("DEFAULT_TOP_N").as_deref())?;

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            llm_api_key: optional_env("LLM_API_KEY"),
            narrative_timeout: Duration::from_millis(
                optional_env("NARRATIVE_TIMEOUT_MS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("NARRATIVE_TIMEOUT_MS must be a whole number of milliseconds")?
                    .unwrap_or(4000),
            ),
            default_top_n,
            dev_bearer_tokens: optional_env("DEV_BEARER_TOKENS")
                .map(|v| parse_token_pairs(&v))
                .transpose()?
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unset falls back to the matcher default; anything non-positive is rejected.
fn parse_top_n(raw: Option<&str>) -> Result<i64> {
    let top_n = raw
        .map(|v| v.trim().parse::<i64>())
        .transpose()
        .context("DEFAULT_TOP_N must be an integer")?
        .unwrap_or(DEFAULT_TOP_N);
    if top_n <= 0 {
        bail!("DEFAULT_TOP_N must be positive, got {top_n}");
    }
    Ok(top_n)
}

/// Parses `tok1=user1,tok2=user2`.
fn parse_token_pairs(raw: &str) -> Result<Vec<(String, String)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (token, user) = pair
                .split_once('=')
                .with_context(|| format!("DEV_BEARER_TOKENS entry '{pair}' must be token=user"))?;
            let (token, user) = (token.trim(), user.trim());
            if token.is_empty() || user.is_empty() {
                bail!("DEV_BEARER_TOKENS entry '{pair}' has an empty token or user");
            }
            Ok((token.to_string(), user.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_pairs() {
        let pairs = parse_token_pairs(" a=alice, b = bob ,").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "alice".to_string()),
                ("b".to_string(), "bob".to_string())
            ]
        );
    }

    #[test]
    fn test_top_n_defaults_to_matcher_default() {
        assert_eq!(parse_top_n(None).unwrap(), DEFAULT_TOP_N);
        assert_eq!(parse_top_n(Some("3")).unwrap(), 3);
        assert!(parse_top_n(Some("0")).is_err());
        assert!(parse_top_n(Some("five")).is_err());
    }

    #[test]
    fn test_parse_token_pairs_rejects_missing_user() {
        assert!(parse_token_pairs("a=").is_err());
        assert!(parse_token_pairs("justatoken").is_err());
    }
}
