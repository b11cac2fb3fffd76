// Shared builders for unit tests

use storefront_api::{date, NoteId, Order, OrderId, OrderNote, OrderStatus, SiteId};

use crate::storage::{Result as StorageResult, StorageError, StorageManager};

pub fn sample_order(site_id: SiteId, order_id: OrderId, created: &str) -> Order {
    Order {
        site_id,
        order_id,
        parent_id: 0,
        number: order_id.to_string(),
        status: OrderStatus::Processing,
        currency: "USD".into(),
        customer_note: String::new(),
        date_created: date::parse(created).unwrap(),
        date_modified: None,
        discount_total: "0.00".into(),
        shipping_total: "0.00".into(),
        total: "31.20".into(),
        total_tax: "1.20".into(),
        payment_method_title: "Cash on delivery".into(),
        billing: None,
        shipping: None,
        items: Vec::new(),
    }
}

pub fn sample_note(site_id: SiteId, order_id: OrderId, note_id: NoteId, created: &str) -> OrderNote {
    OrderNote {
        site_id,
        order_id,
        note_id,
        date_created: date::parse(created).unwrap(),
        note: format!("note #{note_id}"),
        is_customer_note: false,
        author: "Jane Shopkeeper".into(),
    }
}

/// Storage whose every call fails, as if its lock had been poisoned.
pub struct FailingStorage;

#[async_trait::async_trait]
impl StorageManager for FailingStorage {
    async fn upsert_order(&self, _order: &Order) -> StorageResult<()> {
        Err(StorageError::LockPoisoned)
    }

    async fn upsert_orders(&self, _orders: &[Order]) -> StorageResult<()> {
        Err(StorageError::LockPoisoned)
    }

    async fn load_order(&self, _site_id: SiteId, _order_id: OrderId) -> StorageResult<Option<Order>> {
        Err(StorageError::LockPoisoned)
    }

    async fn load_orders(&self, _site_id: SiteId) -> StorageResult<Vec<Order>> {
        Err(StorageError::LockPoisoned)
    }

    async fn delete_orders(&self, _site_id: SiteId) -> StorageResult<u64> {
        Err(StorageError::LockPoisoned)
    }

    async fn upsert_order_note(&self, _note: &OrderNote) -> StorageResult<bool> {
        Err(StorageError::LockPoisoned)
    }

    async fn upsert_order_notes(&self, _notes: &[OrderNote]) -> StorageResult<usize> {
        Err(StorageError::LockPoisoned)
    }

    async fn load_order_notes(
        &self,
        _site_id: SiteId,
        _order_id: OrderId,
    ) -> StorageResult<Vec<OrderNote>> {
        Err(StorageError::LockPoisoned)
    }

    async fn reset(&self) -> StorageResult<()> {
        Err(StorageError::LockPoisoned)
    }
}
