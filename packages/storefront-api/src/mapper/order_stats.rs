use serde::Deserialize;
use serde_json::Value;

use super::{decode, Mapper};
use crate::error::Result;
use crate::types::{OrderStats, OrderStatsItem, SiteId, StatGranularity};

/// Maps the order stats report.
///
/// The report keeps its period rows under `data` as a positional matrix whose
/// column names are listed once in `fields`.
#[derive(Debug, Clone, Copy)]
pub struct OrderStatsMapper {
    pub site_id: SiteId,
}

#[derive(Debug, Deserialize)]
struct StatsDocument {
    date: String,
    unit: StatGranularity,
    #[serde(deserialize_with = "quantity")]
    quantity: u32,
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
    #[serde(default)]
    total_gross_sales: f64,
    #[serde(default)]
    total_net_sales: f64,
    #[serde(default)]
    total_orders: i64,
    #[serde(default)]
    total_products: i64,
    #[serde(default)]
    avg_gross_sales: f64,
    #[serde(default)]
    avg_net_sales: f64,
    #[serde(default)]
    avg_orders: f64,
    #[serde(default)]
    avg_products: f64,
}

impl Mapper for OrderStatsMapper {
    type Output = OrderStats;

    fn map(&self, response: &[u8]) -> Result<OrderStats> {
        let document: StatsDocument = decode(response)?;

        let items = document
            .data
            .iter()
            .map(|row| OrderStatsItem::from_row(&document.fields, row))
            .collect::<Result<Vec<_>>>()?;

        Ok(OrderStats {
            site_id: self.site_id,
            date: document.date,
            granularity: document.unit,
            quantity: document.quantity,
            fields: document.fields,
            items,
            total_gross_sales: document.total_gross_sales,
            total_net_sales: document.total_net_sales,
            total_orders: document.total_orders,
            total_products: document.total_products,
            average_gross_sales: document.avg_gross_sales,
            average_net_sales: document.avg_net_sales,
            average_orders: document.avg_orders,
            average_products: document.avg_products,
        })
    }
}

/// `quantity` comes back as a string (`"2"`) from some deployments.
fn quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid quantity {n}"))),
        Value::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("invalid quantity {other}"))),
    }
}
