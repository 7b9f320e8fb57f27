//! Session token issuance, validation and extraction helpers

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};
use chrono::{DateTime, Utc};
use cookie::Cookie;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::Role;

/// Signs and verifies HS256 session tokens.
///
/// Tokens are stateless: validity is a function of signature and expiry only.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    /// Issue a token valid from now for the configured lifetime
    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    /// Issue a token as if it were created at `issued_at`
    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expires_at = issued_at.checked_add_signed(self.ttl).ok_or_else(|| {
            tracing::error!(ttl = ?self.ttl, "Token lifetime overflows the clock");
            AuthError::TokenIssueFailed
        })?;

        let claims = SessionClaims {
            user_id,
            email: email.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to sign session token");
            AuthError::TokenIssueFailed
        })
    }

    /// Validate signature, shape and expiry of a token
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Session token validation failed");
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from the Authorization header.
///
/// Returns `Ok(None)` when the header is absent, and `InvalidToken` when it
/// uses another scheme or is not valid ASCII.
pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, AuthError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let header_str = header.to_str().map_err(|_| AuthError::InvalidToken)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        Some(_) => Ok(None),
        None => Err(AuthError::InvalidToken),
    }
}

/// Extract the session token from the named cookie
pub(crate) fn extract_cookie_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|part| Cookie::parse(part.trim().to_string()).ok())
        .find(|cookie| cookie.name() == name && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

/// Locate the session token: the cookie wins, then the Authorization header
pub(crate) fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AuthError> {
    if let Some(token) = extract_cookie_token(headers, cookie_name) {
        return Ok(token);
    }

    extract_bearer_token(headers)?.ok_or(AuthError::MissingToken)
}
