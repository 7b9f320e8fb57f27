//! Authentication and authorization for the VenturesRoom API
//!
//! Provides session token issuance and validation, password hashing, role
//! policies, and axum extractors / route layers that work with any domain
//! state implementing `FromRef<S>` for `AuthBackend`.

mod authorize;
mod backend;
mod claims;
mod config;
mod context;
mod cookies;
mod error;
mod extractors;
mod jwt;
mod middleware;
mod password;
mod types;

pub use authorize::{
    authorize, AdminOnly, ApprovedStartup, ApprovedStructure, ClientOnly, RolePolicy,
    StartupAccount, StartupOrAdmin, StructureAccount,
};
pub use backend::AuthBackend;
pub use claims::SessionClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use cookies::{clear_session_cookie, session_cookie};
pub use error::AuthError;
pub use extractors::{AuthUser, RoleUser};
pub use jwt::TokenIssuer;
pub use middleware::{authenticate, require_roles, AllowedRoles};
pub use password::{
    check_credentials, hash_password, hash_password_blocking, verify_password, PasswordError,
};
pub use types::{AuthIdentity, Role, UnknownRole};
