//! Session cookie headers

use cookie::{time::Duration, Cookie, SameSite};

use crate::config::AuthConfig;

/// `Set-Cookie` value carrying a freshly issued session token
pub fn session_cookie(config: &AuthConfig, token: &str) -> String {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(config.token_ttl.num_seconds()))
        .path("/")
        .build()
        .to_string()
}

/// `Set-Cookie` value that expires the session cookie immediately
pub fn clear_session_cookie(config: &AuthConfig) -> String {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .path("/")
        .build()
        .to_string()
}
