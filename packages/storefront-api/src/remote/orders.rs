use std::sync::Arc;

use serde_json::json;

use super::Remote;
use crate::error::Result;
use crate::mapper::{OrderListMapper, OrderMapper, OrderNoteMapper, OrderNotesMapper};
use crate::network::{Network, Request};
use crate::types::{NewOrderNote, Order, OrderId, OrderNote, OrderStatus, SiteId};

/// Orders and order notes endpoints.
#[derive(Clone)]
pub struct OrdersRemote {
    remote: Remote,
}

impl OrdersRemote {
    pub fn new(network: Arc<dyn Network>) -> Self {
        Self {
            remote: Remote::new(network),
        }
    }

    /// Loads one page of orders, optionally filtered by status.
    pub async fn load_all_orders(
        &self,
        site_id: SiteId,
        status: Option<&OrderStatus>,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Order>> {
        let mut request = Request::get(site_id, "orders")
            .with_parameter("page", page)
            .with_parameter("per_page", page_size);
        if let Some(status) = status {
            request = request.with_parameter("status", status);
        }
        self.remote.enqueue(request, OrderListMapper { site_id }).await
    }

    pub async fn load_order(&self, site_id: SiteId, order_id: OrderId) -> Result<Order> {
        let request = Request::get(site_id, format!("orders/{order_id}"));
        self.remote.enqueue(request, OrderMapper { site_id }).await
    }

    /// Moves an order to `status`; returns the updated document.
    pub async fn update_order(
        &self,
        site_id: SiteId,
        order_id: OrderId,
        status: &OrderStatus,
    ) -> Result<Order> {
        let request = Request::put(site_id, format!("orders/{order_id}"))
            .with_body(json!({ "status": status.as_str() }));
        self.remote.enqueue(request, OrderMapper { site_id }).await
    }

    pub async fn load_order_notes(
        &self,
        site_id: SiteId,
        order_id: OrderId,
    ) -> Result<Vec<OrderNote>> {
        let request = Request::get(site_id, format!("orders/{order_id}/notes"));
        self.remote
            .enqueue(request, OrderNotesMapper { site_id, order_id })
            .await
    }

    /// Adds a note to an order. Customer notes are emailed to the customer.
    pub async fn add_order_note(
        &self,
        site_id: SiteId,
        order_id: OrderId,
        is_customer_note: bool,
        note: &str,
    ) -> Result<OrderNote> {
        let body = NewOrderNote {
            note: note.to_string(),
            customer_note: is_customer_note,
        };
        let request = Request::post(site_id, format!("orders/{order_id}/notes"))
            .with_body(serde_json::to_value(body)?);
        self.remote
            .enqueue(request, OrderNoteMapper { site_id, order_id })
            .await
    }
}
