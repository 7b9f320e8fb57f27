//! Session handlers
//!
//! Implements:
//! - POST /auth/register - Create an account (and its marketplace profile)
//! - POST /auth/login - Exchange credentials for a session token
//! - POST /auth/logout - Expire the session cookie
//! - GET /auth/me - Current account

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use venturesroom_auth::{
    check_credentials, clear_session_cookie, hash_password_blocking, session_cookie, AuthError,
    AuthUser, Role,
};
use venturesroom_common::{Error, ValidatedJson};
use venturesroom_marketplace::{
    create_startup_profile_tx, create_structure_profile_tx, Startup, Structure,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::AccountsState;
use crate::domain::entities::{User, UserResponse};
use crate::domain::validation::{
    normalize_email, normalize_full_name, parse_registration_role, MAX_FULL_NAME_LENGTH,
    MIN_PASSWORD_LENGTH,
};
use crate::repository::create_user_tx;

/// Registration payload. Profile fields apply to startup and structure accounts.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,

    #[validate(length(max = MAX_FULL_NAME_LENGTH))]
    pub full_name: Option<String>,

    /// `client` (default), `startup` or `structure`
    pub role: Option<String>,

    /// Profile name; falls back to the display name, then the email
    #[validate(length(min = 1, max = 200))]
    pub company_name: Option<String>,

    #[validate(length(max = 100))]
    pub sector: Option<String>,

    #[validate(length(max = 100))]
    pub stage: Option<String>,

    #[validate(length(max = 100))]
    pub structure_type: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
}

impl RegisterRequest {
    fn profile_name(&self, user: &User) -> String {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| user.full_name.clone())
            .unwrap_or_else(|| user.email.clone())
    }
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body returned by register and login
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

/// Body carrying a single user
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: UserResponse,
}

/// Body carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Issue a token for `user` and build the response with its cookie
fn session_response(
    state: &AccountsState,
    status: StatusCode,
    message: &str,
    user: User,
) -> ApiResult<Response> {
    let token = state.auth.tokens().issue(user.id, &user.email, user.role)?;
    let cookie = session_cookie(state.auth.config(), &token);

    let body = SessionResponse {
        success: true,
        message: message.to_string(),
        user: user.into(),
        token,
    };

    Ok((status, [(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// POST /auth/register
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Response> {
    let role = parse_registration_role(req.role.as_deref())
        .map_err(|field| Error::InvalidInput(vec![field]))?;

    let email = normalize_email(&req.email);
    if state.repos.users.find_by_email(&email).await?.is_some() {
        tracing::debug!(%email, "Registration with existing email");
        return Err(ApiError::DuplicateEmail);
    }

    let password_hash = hash_password_blocking(req.password.clone()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to hash password");
        Error::Internal("Failed to hash password".to_string())
    })?;

    let user = User::new(
        &email,
        password_hash,
        normalize_full_name(req.full_name.clone()),
        role,
    )?;

    let mut tx = state.repos.begin().await?;
    let created = create_user_tx(&mut tx, &user).await?;

    match role {
        Role::Startup => {
            let mut startup = Startup::new(created.id, req.profile_name(&created))?;
            startup.sector = req.sector;
            startup.stage = req.stage;
            startup.description = req.description;
            startup.website = req.website;
            create_startup_profile_tx(&mut tx, &startup).await?;
        }
        Role::Structure => {
            let mut structure = Structure::new(created.id, req.profile_name(&created))?;
            structure.structure_type = req.structure_type;
            structure.description = req.description;
            structure.website = req.website;
            create_structure_profile_tx(&mut tx, &structure).await?;
        }
        Role::Client | Role::Admin => {}
    }

    tx.commit().await?;

    tracing::info!(
        user_id = %created.id,
        email = %created.email,
        role = %created.role,
        is_approved = created.is_approved,
        "User registered"
    );

    let message = if created.is_approved {
        "User registered successfully"
    } else {
        "Registration successful. Your account is pending approval."
    };

    session_response(&state, StatusCode::CREATED, message, created)
}

/// POST /auth/login
///
/// The password is checked before the approval state, so the pending-approval
/// answer is only ever given to the account holder. Unknown emails still pay
/// for a hash verification.
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Response> {
    let email = normalize_email(&req.email);

    let user = state.repos.users.find_by_email(&email).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let password_ok = check_credentials(req.password, stored_hash).await;

    let user = match user {
        Some(user) if password_ok => user,
        Some(user) => {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        None => {
            tracing::warn!(%email, "Login for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    if !user.can_sign_in() {
        tracing::info!(user_id = %user.id, role = %user.role, "Login blocked pending approval");
        return Err(AuthError::PendingApproval.into());
    }

    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
    session_response(&state, StatusCode::OK, "Login successful", user)
}

/// POST /auth/logout
pub async fn logout(State(state): State<AccountsState>) -> Response {
    let cookie = clear_session_cookie(state.auth.config());
    let body = MessageResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    };

    ([(SET_COOKIE, cookie)], Json(body)).into_response()
}

/// GET /auth/me
pub async fn me(AuthUser(ctx): AuthUser) -> Json<UserEnvelope> {
    Json(UserEnvelope {
        success: true,
        user: ctx.user.into(),
    })
}
