//! Authentication configuration

use chrono::Duration;
use venturesroom_common::Config;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub cookie_name: String,
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Config with the default seven-day lifetime and `token` cookie
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::days(7),
            cookie_name: "token".to_string(),
            secure_cookies: false,
        }
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: Duration::days(config.token_ttl_days),
            cookie_name: config.auth_cookie_name.clone(),
            secure_cookies: config.secure_cookies,
        }
    }
}
