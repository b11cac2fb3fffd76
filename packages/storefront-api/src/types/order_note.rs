use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{NoteId, OrderId, SiteId};

/// A note attached to an order. Notes are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNote {
    #[serde(default)]
    pub site_id: SiteId,
    #[serde(default)]
    pub order_id: OrderId,
    #[serde(rename = "id")]
    pub note_id: NoteId,
    #[serde(rename = "date_created_gmt", with = "crate::date")]
    pub date_created: NaiveDateTime,
    pub note: String,
    /// `true` when the note is visible to (and emailed to) the customer,
    /// `false` for private notes.
    #[serde(rename = "customer_note", default)]
    pub is_customer_note: bool,
    #[serde(default)]
    pub author: String,
}

/// Request body of the add-note endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderNote {
    pub note: String,
    pub customer_note: bool,
}
