//! Domain entities for the Marketplace domain
//!
//! Startup and structure profiles, the products startups sell, and the
//! orders clients place for them. Each entity enforces its own business rules
//! on construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venturesroom_common::{Error, Result};

use crate::domain::state::{OrderEvent, OrderStateMachine, OrderStatus};

/// Maximum units in a single order
pub const MAX_ORDER_QUANTITY: i64 = 1000;

/// Maximum length of names (profiles, products)
pub const MAX_NAME_LENGTH: usize = 200;

/// Basis points in one whole (100%)
pub const BPS_DENOMINATOR: i64 = 10_000;

fn validate_name(name: &str, what: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if len == 0 || len > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "{what} must be 1-{MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Merge an optional text field from a partial update.
///
/// Absent keeps the current value, blank clears it, anything else is stored trimmed.
pub fn merge_text(current: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        let value = value.trim();
        *current = (!value.is_empty()).then(|| value.to_string());
    }
}

/// Startup profile, one per `startup` account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Startup {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub name: String,
    pub sector: Option<String>,
    pub stage: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Startup {
    /// New unapproved profile for `owner_id`
    pub fn new(owner_id: Uuid, name: String) -> Result<Self> {
        validate_name(&name, "Startup name")?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.trim().to_string(),
            sector: None,
            stage: None,
            description: None,
            website: None,
            is_approved: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Support structure profile (incubator, accelerator, ...), one per `structure` account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Structure {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub name: String,
    pub structure_type: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Structure {
    /// New unapproved profile for `owner_id`
    pub fn new(owner_id: Uuid, name: String) -> Result<Self> {
        validate_name(&name, "Structure name")?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.trim().to_string(),
            structure_type: None,
            description: None,
            website: None,
            is_approved: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Product listed by a startup. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub startup_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        startup_id: Uuid,
        name: String,
        description: Option<String>,
        price_cents: i64,
    ) -> Result<Self> {
        validate_name(&name, "Product name")?;
        Self::validate_price(price_cents)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            startup_id,
            name: name.trim().to_string(),
            description,
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_price(price_cents: i64) -> Result<()> {
        if price_cents < 0 {
            return Err(Error::Validation("Price cannot be negative".to_string()));
        }
        Ok(())
    }

    /// Apply a partial update, keeping current values for absent fields.
    /// A blank description clears it.
    pub fn apply_update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        price_cents: Option<i64>,
        is_active: Option<bool>,
    ) -> Result<()> {
        if let Some(name) = name {
            validate_name(&name, "Product name")?;
            self.name = name.trim().to_string();
        }
        if let Some(price_cents) = price_cents {
            Self::validate_price(price_cents)?;
            self.price_cents = price_cents;
        }
        merge_text(&mut self.description, description);
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Compute `(total, commission)` in cents for `quantity` units.
///
/// Commission is `total * bps / 10000`, rounded down.
pub fn order_amounts(
    unit_price_cents: i64,
    quantity: i64,
    commission_rate_bps: i64,
) -> Result<(i64, i64)> {
    let overflow = || Error::Validation("Order total is too large".to_string());

    let total = unit_price_cents.checked_mul(quantity).ok_or_else(overflow)?;
    let commission = total
        .checked_mul(commission_rate_bps)
        .ok_or_else(overflow)?
        / BPS_DENOMINATOR;

    Ok((total, commission))
}

/// Client order for a product. Price and commission are frozen at placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub product_id: Uuid,
    pub startup_id: Uuid,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_cents: i64,
    pub commission_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Place an order for an active product
    pub fn place(
        client_id: Uuid,
        product: &Product,
        quantity: i64,
        commission_rate_bps: i64,
    ) -> Result<Self> {
        if !(1..=MAX_ORDER_QUANTITY).contains(&quantity) {
            return Err(Error::Validation(format!(
                "Quantity must be between 1 and {MAX_ORDER_QUANTITY}"
            )));
        }
        if !product.is_active {
            return Err(Error::Validation(
                "Product is not available for ordering".to_string(),
            ));
        }

        let (total_cents, commission_cents) =
            order_amounts(product.price_cents, quantity, commission_rate_bps)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            product_id: product.id,
            startup_id: product.startup_id,
            quantity,
            unit_price_cents: product.price_cents,
            total_cents,
            commission_cents,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Run `event` through the state machine, updating status in place
    pub fn apply(&mut self, event: OrderEvent) -> Result<()> {
        self.status = OrderStateMachine::transition(self.status, event)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Per-startup revenue aggregate over non-cancelled orders
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CommissionSummary {
    pub startup_id: Uuid,
    pub startup_name: String,
    pub order_count: i64,
    pub gross_cents: i64,
    pub commission_cents: i64,
}
