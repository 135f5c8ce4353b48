use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub category_id: Option<Uuid>,
    /// Property name -> selected value. Kept as a sorted map so serialized
    /// output is deterministic. Keys are not required to match the category's
    /// declared properties; orphaned legacy keys are tolerated.
    #[sqlx(json)]
    pub properties: BTreeMap<String, String>,
    pub discount: Option<Decimal>,
    /// Derived: discount expressed as a percentage of price, two decimals.
    pub percentage: Option<Decimal>,
    pub top_selling: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for product create and update (full-document replace of the mutable
/// fields; `percentage` is derived server-side, never accepted from clients).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub top_selling: bool,
}

impl ProductPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Product title is required".to_string());
        }
        if self.price < Decimal::ZERO {
            return Err("Price must not be negative".to_string());
        }
        if let Some(discount) = self.discount {
            if discount < Decimal::ZERO {
                return Err("Discount must not be negative".to_string());
            }
        }
        Ok(())
    }
}

/// Compute the discount percentage for a product, rounded to two decimals.
/// Unset when there is no discount, a zero discount, or a non-positive price.
pub fn derive_percentage(price: Decimal, discount: Option<Decimal>) -> Option<Decimal> {
    let discount = discount?;
    if price <= Decimal::ZERO || discount.is_zero() {
        return None;
    }
    Some(((price - discount) / price * Decimal::from(100)).round_dp(2))
}
