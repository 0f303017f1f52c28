/*
 * Responsibility
 * - 環境変数 (.env) から起動時に一度だけ設定を読み込む
 * - 不足・不正な値は ConfigError で起動失敗にする
 * - SECRET などの秘密情報は Debug に出さない
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Upper bound for token lifetime and clock leeway: 30 days.
pub const MAX_TOKEN_SECONDS: u64 = 30 * 24 * 60 * 60;

/// A set but unparsable value is an error, never a silent default.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// `None` means the in-memory store (development only).
    pub database_url: Option<String>,

    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub secret: String,
    pub token_ttl_seconds: u64,
    pub token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SECRET and credentials inside DATABASE_URL stay out of logs
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database", &self.database_url.as_ref().map(|_| "postgres"))
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup so it can be exercised without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3003)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|raw| AppEnv::parse(&raw))
            .unwrap_or(AppEnv::Development);

        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if app_env.is_production() && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let sqids_min_length: usize = parse_or(&lookup, "SQIDS_MIN_LENGTH", 10)?;

        let sqids_alphabet = lookup("SQIDS_ALPHABET").unwrap_or_else(|| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let secret = lookup("SECRET").ok_or(ConfigError::Missing("SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("SECRET"));
        }

        let token_ttl_seconds: u64 = parse_or(&lookup, "TOKEN_TTL_SECONDS", 3600)?;
        if token_ttl_seconds == 0 || token_ttl_seconds > MAX_TOKEN_SECONDS {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"));
        }

        let token_leeway_seconds: u64 = parse_or(&lookup, "TOKEN_LEEWAY_SECONDS", 0)?;
        if token_leeway_seconds > MAX_TOKEN_SECONDS {
            return Err(ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            database_url,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            secret,
            token_ttl_seconds,
            token_leeway_seconds,
        })
    }
}
