//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. `Config::from_lookup` takes
//! the variable source as a function so tests never touch the process
//! environment.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Signing secret used when `JWT_SECRET` is unset outside production.
pub const DEV_JWT_SECRET: &str = "venturesroom-dev-only-secret-change-me";

/// Longest session lifetime accepted from `TOKEN_TTL_DAYS`
pub const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => bail!("APP_ENV must be development, test or production (got {other:?})"),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,

    /// SQLite connection URL
    pub database_url: String,

    /// Token signing
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub auth_cookie_name: String,
    pub secure_cookies: bool,

    /// Platform commission applied to every order, in basis points
    pub commission_rate_bps: i64,

    /// Out-of-band admin provisioning
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match var("APP_ENV") {
            Some(value) => Environment::parse(&value)?,
            None => Environment::Development,
        };

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if environment.is_production() => {
                bail!("JWT_SECRET is required in production")
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the development-only signing secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let token_ttl_days: i64 = parse_or(var("TOKEN_TTL_DAYS"), 7, "TOKEN_TTL_DAYS")?;
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&token_ttl_days) {
            bail!("TOKEN_TTL_DAYS must be between 1 and {MAX_TOKEN_TTL_DAYS}");
        }

        let commission_rate_bps: i64 =
            parse_or(var("COMMISSION_RATE_BPS"), 500, "COMMISSION_RATE_BPS")?;
        if !(0..=10_000).contains(&commission_rate_bps) {
            bail!("COMMISSION_RATE_BPS must be between 0 and 10000");
        }

        let secure_cookies = match var("SECURE_COOKIES") {
            Some(value) => parse_bool(&value).context("SECURE_COOKIES must be a boolean")?,
            None => environment.is_production(),
        };

        let config = Self {
            environment,
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://venturesroom.db".to_string()),
            jwt_secret,
            token_ttl_days,
            auth_cookie_name: var("AUTH_COOKIE_NAME").unwrap_or_else(|| "token".to_string()),
            secure_cookies,
            commission_rate_bps,
            admin_email: var("ADMIN_EMAIL"),
            admin_password: var("ADMIN_PASSWORD"),
            rust_log: var("RUST_LOG")
                .unwrap_or_else(|| "venturesroom=debug,tower_http=info".to_string()),
            port: parse_or(var("PORT"), 3000, "PORT")?,
        };

        Ok(config)
    }
}

fn parse_or<T>(value: Option<String>, default: T, name: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
