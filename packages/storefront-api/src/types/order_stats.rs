use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SiteId;
use crate::error::{NetworkError, Result};

/// Bucket size of an order stats report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGranularity {
    Day,
    Week,
    Month,
    Year,
}

impl StatGranularity {
    /// Value of the `unit` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Formats the latest date to include the way the endpoint expects it for
    /// this granularity (`2018-06-23`, `2018-W25`, `2018-06`, `2018`).
    pub fn format_date(&self, date: NaiveDate) -> String {
        let pattern = match self {
            Self::Day => "%Y-%m-%d",
            Self::Week => "%G-W%V",
            Self::Month => "%Y-%m",
            Self::Year => "%Y",
        };
        date.format(pattern).to_string()
    }
}

impl fmt::Display for StatGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatGranularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown granularity `{other}`")),
        }
    }
}

/// Order statistics for a run of period buckets ending at `date`.
///
/// Rebuilt wholesale on every fetch; never merged or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub site_id: SiteId,
    pub date: String,
    pub granularity: StatGranularity,
    pub quantity: u32,
    /// Column names as sent by the backend, in wire order.
    pub fields: Vec<String>,
    pub items: Vec<OrderStatsItem>,
    pub total_gross_sales: f64,
    pub total_net_sales: f64,
    pub total_orders: i64,
    pub total_products: i64,
    pub average_gross_sales: f64,
    pub average_net_sales: f64,
    pub average_orders: f64,
    pub average_products: f64,
}

/// Metrics of one period bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatsItem {
    pub period: String,
    pub orders: i64,
    pub products: i64,
    pub coupons: i64,
    pub coupon_discount: f64,
    pub total_sales: f64,
    pub total_tax: f64,
    pub total_shipping: f64,
    pub total_shipping_tax: f64,
    pub total_refund: f64,
    pub total_tax_refund: f64,
    pub total_shipping_refund: f64,
    pub total_shipping_tax_refund: f64,
    pub currency: String,
    pub gross_sales: f64,
    pub net_sales: f64,
    pub avg_order_value: f64,
    pub avg_products_per_order: f64,
}

impl OrderStatsItem {
    /// Builds an item from one positional row of the stats matrix.
    ///
    /// `field_names` and `raw_data` must have the same length. Columns this
    /// type does not know are skipped; absent numeric columns stay at zero.
    pub fn from_row(field_names: &[String], raw_data: &[Value]) -> Result<Self> {
        if field_names.len() != raw_data.len() {
            return Err(NetworkError::Decoding(format!(
                "stats row has {} values for {} fields",
                raw_data.len(),
                field_names.len()
            )));
        }

        let row: HashMap<&str, &Value> = field_names
            .iter()
            .map(String::as_str)
            .zip(raw_data.iter())
            .collect();

        let text = |name: &str| -> Result<String> {
            match row.get(name) {
                None | Some(Value::Null) => Ok(String::new()),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Number(n)) => Ok(n.to_string()),
                Some(other) => Err(NetworkError::Decoding(format!(
                    "stats field `{name}` is not text: {other}"
                ))),
            }
        };
        let real = |name: &str| -> Result<f64> {
            match row.get(name) {
                None | Some(Value::Null) => Ok(0.0),
                Some(value) => number(name, value),
            }
        };
        let count = |name: &str| -> Result<i64> { real(name).map(|v| v.round() as i64) };

        Ok(Self {
            period: text("period")?,
            orders: count("orders")?,
            products: count("products")?,
            coupons: count("coupons")?,
            coupon_discount: real("coupon_discount")?,
            total_sales: real("total_sales")?,
            total_tax: real("total_tax")?,
            total_shipping: real("total_shipping")?,
            total_shipping_tax: real("total_shipping_tax")?,
            total_refund: real("total_refund")?,
            total_tax_refund: real("total_tax_refund")?,
            total_shipping_refund: real("total_shipping_refund")?,
            total_shipping_tax_refund: real("total_shipping_tax_refund")?,
            currency: text("currency")?,
            gross_sales: real("gross_sales")?,
            net_sales: real("net_sales")?,
            avg_order_value: real("avg_order_value")?,
            avg_products_per_order: real("avg_products_per_order")?,
        })
    }
}

fn number(name: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        NetworkError::Decoding(format!("stats field `{name}` is not numeric: {value}"))
    })
}
