//! In-memory storage implementation for testing and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use storefront_api::{NoteId, Order, OrderId, OrderNote, SiteId};

use super::{Result, StorageError, StorageManager};

/// In-memory storage for orders and notes.
///
/// Useful for tests and short-lived tools. Data is lost when dropped.
#[derive(Default)]
pub struct MemoryStorage {
    orders: RwLock<HashMap<(SiteId, OrderId), Order>>,
    notes: RwLock<HashMap<(SiteId, OrderId, NoteId), OrderNote>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().map(|o| o.len()).unwrap_or_default()
    }

    pub fn note_count(&self) -> usize {
        self.notes.read().map(|n| n.len()).unwrap_or_default()
    }

    fn insert_note(&self, note: &OrderNote) -> Result<bool> {
        let orders = self.orders.read().map_err(|_| StorageError::LockPoisoned)?;
        if !orders.contains_key(&(note.site_id, note.order_id)) {
            return Ok(false);
        }
        self.notes
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .insert((note.site_id, note.order_id, note.note_id), note.clone());
        Ok(true)
    }
}

#[async_trait]
impl StorageManager for MemoryStorage {
    async fn upsert_order(&self, order: &Order) -> Result<()> {
        self.orders
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .insert((order.site_id, order.order_id), order.clone());
        Ok(())
    }

    async fn upsert_orders(&self, orders: &[Order]) -> Result<()> {
        let mut stored = self.orders.write().map_err(|_| StorageError::LockPoisoned)?;
        for order in orders {
            stored.insert((order.site_id, order.order_id), order.clone());
        }
        Ok(())
    }

    async fn load_order(&self, site_id: SiteId, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self
            .orders
            .read()
            .map_err(|_| StorageError::LockPoisoned)?
            .get(&(site_id, order_id))
            .cloned())
    }

    async fn load_orders(&self, site_id: SiteId) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .map_err(|_| StorageError::LockPoisoned)?
            .values()
            .filter(|o| o.site_id == site_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then(b.order_id.cmp(&a.order_id))
        });
        Ok(orders)
    }

    async fn delete_orders(&self, site_id: SiteId) -> Result<u64> {
        let mut orders = self.orders.write().map_err(|_| StorageError::LockPoisoned)?;
        let mut notes = self.notes.write().map_err(|_| StorageError::LockPoisoned)?;

        let before = orders.len();
        orders.retain(|(site, _), _| *site != site_id);
        notes.retain(|(site, _, _), _| *site != site_id);
        Ok((before - orders.len()) as u64)
    }

    async fn upsert_order_note(&self, note: &OrderNote) -> Result<bool> {
        self.insert_note(note)
    }

    async fn upsert_order_notes(&self, notes: &[OrderNote]) -> Result<usize> {
        let mut kept = 0;
        for note in notes {
            if self.insert_note(note)? {
                kept += 1;
            }
        }
        Ok(kept)
    }

    async fn load_order_notes(
        &self,
        site_id: SiteId,
        order_id: OrderId,
    ) -> Result<Vec<OrderNote>> {
        let mut notes: Vec<OrderNote> = self
            .notes
            .read()
            .map_err(|_| StorageError::LockPoisoned)?
            .values()
            .filter(|n| n.site_id == site_id && n.order_id == order_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then(b.note_id.cmp(&a.note_id))
        });
        Ok(notes)
    }

    async fn reset(&self) -> Result<()> {
        self.orders.write().map_err(|_| StorageError::LockPoisoned)?.clear();
        self.notes.write().map_err(|_| StorageError::LockPoisoned)?.clear();
        Ok(())
    }
}
