// src/config.rs
use axum::http::HeaderValue;
use std::{env, fmt, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Staging,
    Production,
}

impl AppEnv {
    pub fn is_production(self) -> bool {
        matches!(self, AppEnv::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Staging => "staging",
            AppEnv::Production => "production",
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "staging" => Ok(AppEnv::Staging),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(ConfigError::Invalid(format!("unknown APP_ENV '{other}'"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    app_env: AppEnv,
    listen_addr: String,
    database_url: Option<String>,
    biscuit_private_key: String,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    allowed_origins: Vec<String>,
    rate_limit_enabled: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: u64 = 30;
const DEFAULT_REFRESH_TOKEN_TTL_DAYS: u64 = 30;

const MAX_ACCESS_TOKEN_TTL_MINUTES: u64 = 24 * 60;
const MAX_REFRESH_TOKEN_TTL_DAYS: u64 = 365;

fn parse_number(
    key: &'static str,
    raw: Option<String>,
    default: u64,
    max: u64,
) -> Result<u64, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(number) if (1..=max).contains(&number) => Ok(number),
        _ => Err(ConfigError::Invalid(format!(
            "{key} must be an integer between 1 and {max}"
        ))),
    }
}

/// Comma-separated `http(s)://host[:port]` entries. One bad entry rejects
/// the whole list.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let has_scheme = origin
                .strip_prefix("https://")
                .or_else(|| origin.strip_prefix("http://"))
                .is_some_and(|host| !host.is_empty() && !host.contains('/'));
            if has_scheme && HeaderValue::from_str(origin).is_ok() {
                Ok(origin.to_string())
            } else {
                Err(ConfigError::Invalid(format!(
                    "ALLOWED_ORIGINS entry '{}' is not a valid origin",
                    origin.escape_debug()
                )))
            }
        })
        .collect::<Result<_, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::Invalid(
            "ALLOWED_ORIGINS is set but lists no origins".into(),
        ));
    }
    Ok(origins)
}

fn parse_flag(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None => Ok(default),
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        Some(value) if value.eq_ignore_ascii_case("true") => Ok(true),
        Some(value) if value.eq_ignore_ascii_case("false") => Ok(false),
        Some(_) => Err(ConfigError::Invalid(format!("{key} must be true or false"))),
    }
}

impl AppConfig {
    /// Build configuration from environment variables, loading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let app_env = lookup("APP_ENV")
            .map(|raw| raw.parse::<AppEnv>())
            .transpose()?
            .unwrap_or(AppEnv::Development);
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let biscuit_private_key = lookup("BISCUIT_ROOT_PRIVATE_KEY")
            .ok_or(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;
        if biscuit_private_key.len() != 64
            || !biscuit_private_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let access_minutes = parse_number(
            "ACCESS_TOKEN_TTL_MINUTES",
            lookup("ACCESS_TOKEN_TTL_MINUTES"),
            DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            MAX_ACCESS_TOKEN_TTL_MINUTES,
        )?;
        let refresh_days = parse_number(
            "REFRESH_TOKEN_TTL_DAYS",
            lookup("REFRESH_TOKEN_TTL_DAYS"),
            DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            MAX_REFRESH_TOKEN_TTL_DAYS,
        )?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .transpose()?
            .unwrap_or_default();

        let rate_limit_enabled =
            parse_flag("RATE_LIMIT_ENABLED", lookup("RATE_LIMIT_ENABLED"), true)?;

        Ok(Self {
            app_env,
            listen_addr,
            database_url,
            biscuit_private_key,
            access_token_ttl: Duration::from_secs(access_minutes * 60),
            refresh_token_ttl: Duration::from_secs(refresh_days * 24 * 60 * 60),
            allowed_origins,
            rate_limit_enabled,
        })
    }

    pub fn app_env(&self) -> AppEnv {
        self.app_env
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// `None` selects the in-memory stores.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    /// Empty means any origin.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_enabled
    }
}
