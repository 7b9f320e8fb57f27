//! Platform commission report

use axum::{extract::State, Json};
use serde::Serialize;

use venturesroom_auth::{AdminOnly, RoleUser};

use crate::api::error::ApiResult;
use crate::api::middleware::MarketplaceState;
use crate::domain::entities::CommissionSummary;

/// Commission totals across all startups
#[derive(Debug, Serialize)]
pub struct CommissionReport {
    /// Rate applied to new orders; past orders keep the rate they were placed at
    pub current_rate_bps: i64,
    pub total_gross_cents: i64,
    pub total_commission_cents: i64,
    pub startups: Vec<CommissionSummary>,
}

/// GET /admin/commissions
pub async fn commission_report(
    RoleUser(_ctx, _): RoleUser<AdminOnly>,
    State(state): State<MarketplaceState>,
) -> ApiResult<Json<CommissionReport>> {
    let startups = state.repos.orders.commission_summary().await?;

    Ok(Json(CommissionReport {
        current_rate_bps: state.commission_rate_bps,
        total_gross_cents: startups.iter().map(|s| s.gross_cents).sum(),
        total_commission_cents: startups.iter().map(|s| s.commission_cents).sum(),
        startups,
    }))
}
