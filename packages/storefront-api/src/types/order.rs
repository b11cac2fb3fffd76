use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{amount, OrderId, SiteId};

/// A storefront order.
///
/// Orders are created and refreshed by fetches and status updates; they are
/// never deleted remotely, only moved between statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub site_id: SiteId,
    #[serde(rename = "id")]
    pub order_id: OrderId,
    #[serde(default)]
    pub parent_id: OrderId,
    #[serde(default)]
    pub number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub customer_note: String,
    #[serde(rename = "date_created_gmt", with = "crate::date")]
    pub date_created: NaiveDateTime,
    #[serde(rename = "date_modified_gmt", with = "crate::date::option", default)]
    pub date_modified: Option<NaiveDateTime>,
    #[serde(deserialize_with = "amount", default)]
    pub discount_total: String,
    #[serde(deserialize_with = "amount", default)]
    pub shipping_total: String,
    #[serde(deserialize_with = "amount", default)]
    pub total: String,
    #[serde(deserialize_with = "amount", default)]
    pub total_tax: String,
    #[serde(default)]
    pub payment_method_title: String,
    #[serde(default)]
    pub billing: Option<Address>,
    #[serde(default)]
    pub shipping: Option<Address>,
    #[serde(rename = "line_items", default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Display name of the billing customer, if any.
    pub fn customer_name(&self) -> Option<String> {
        let billing = self.billing.as_ref()?;
        let name = format!("{} {}", billing.first_name, billing.last_name);
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Order status slug. Plugins register their own statuses, so unknown slugs are
/// preserved verbatim in [`OrderStatus::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    Custom(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
            Self::Custom(slug) => slug,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(slug: String) -> Self {
        match slug.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "on-hold" => Self::OnHold,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            "failed" => Self::Failed,
            _ => Self::Custom(slug),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(slug: &str) -> Self {
        Self::from(slug.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One line item of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "id")]
    pub item_id: i64,
    pub name: String,
    pub product_id: i64,
    #[serde(default)]
    pub variation_id: i64,
    pub quantity: i64,
    #[serde(deserialize_with = "amount", default)]
    pub price: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(deserialize_with = "amount", default)]
    pub subtotal: String,
    #[serde(deserialize_with = "amount", default)]
    pub subtotal_tax: String,
    #[serde(deserialize_with = "amount", default)]
    pub total: String,
    #[serde(deserialize_with = "amount", default)]
    pub total_tax: String,
}
