//! Authorization gate and route role policies

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::Role;

/// Check an identity against a route's allow-list.
///
/// Pure predicate: no identity is `Unauthenticated`, a role outside the
/// list is `Forbidden`.
pub fn authorize(identity: Option<&AuthContext>, allowed: &[Role]) -> Result<(), AuthError> {
    let ctx = identity.ok_or(AuthError::Unauthenticated)?;

    if !ctx.has_any_role(allowed) {
        tracing::debug!(
            user_id = %ctx.user.id,
            role = %ctx.user.role,
            ?allowed,
            "Role not permitted for route"
        );
        return Err(AuthError::Forbidden);
    }

    Ok(())
}

/// Static role requirements for a group of routes.
///
/// Implemented by zero-sized marker types consumed by `RoleUser<P>`.
pub trait RolePolicy: Send + Sync + 'static {
    const ALLOWED: &'static [Role];

    /// Also require a (freshly loaded) approval flag
    const REQUIRES_APPROVAL: bool = false;

    /// Full check: role allow-list, then approval
    fn check(ctx: &AuthContext) -> Result<(), AuthError> {
        authorize(Some(ctx), Self::ALLOWED)?;

        if Self::REQUIRES_APPROVAL && !ctx.is_approved() {
            tracing::debug!(user_id = %ctx.user.id, "Unapproved account on approval-gated route");
            return Err(AuthError::PendingApproval);
        }

        Ok(())
    }
}

/// Platform administrators
#[derive(Debug)]
pub struct AdminOnly;

impl RolePolicy for AdminOnly {
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// Buyers placing orders
#[derive(Debug)]
pub struct ClientOnly;

impl RolePolicy for ClientOnly {
    const ALLOWED: &'static [Role] = &[Role::Client];
}

/// Any startup account, approved or not (read own profile)
#[derive(Debug)]
pub struct StartupAccount;

impl RolePolicy for StartupAccount {
    const ALLOWED: &'static [Role] = &[Role::Startup];
}

/// Startups acting on the marketplace
#[derive(Debug)]
pub struct ApprovedStartup;

impl RolePolicy for ApprovedStartup {
    const ALLOWED: &'static [Role] = &[Role::Startup];
    const REQUIRES_APPROVAL: bool = true;
}

/// Any structure account, approved or not (read own profile)
#[derive(Debug)]
pub struct StructureAccount;

impl RolePolicy for StructureAccount {
    const ALLOWED: &'static [Role] = &[Role::Structure];
}

/// Structures acting on the marketplace
#[derive(Debug)]
pub struct ApprovedStructure;

impl RolePolicy for ApprovedStructure {
    const ALLOWED: &'static [Role] = &[Role::Structure];
    const REQUIRES_APPROVAL: bool = true;
}

/// Order fulfilment: the selling startup or an administrator
#[derive(Debug)]
pub struct StartupOrAdmin;

impl RolePolicy for StartupOrAdmin {
    const ALLOWED: &'static [Role] = &[Role::Startup, Role::Admin];
    const REQUIRES_APPROVAL: bool = true;
}
