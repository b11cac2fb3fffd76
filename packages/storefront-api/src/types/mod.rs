//! Domain entities returned by the storefront endpoints.

mod order;
mod order_note;
mod order_stats;

pub use order::{Address, Order, OrderItem, OrderStatus};
pub use order_note::{NewOrderNote, OrderNote};
pub use order_stats::{OrderStats, OrderStatsItem, StatGranularity};

use serde::{Deserialize, Deserializer};

/// Site identifier. The remote payloads never carry it; mappers inject it.
pub type SiteId = i64;
pub type OrderId = i64;
pub type NoteId = i64;

/// Decimal amounts arrive either as strings (`"30.00"`) or bare numbers
/// (`25`). Both are kept as their textual representation.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(text) => text,
        Amount::Number(number) => number.to_string(),
        Amount::Missing(()) => String::new(),
    })
}
