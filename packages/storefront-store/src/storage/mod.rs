//! Local storage for orders and their notes.
//!
//! Available backends:
//! - `MemoryStorage` - In-memory storage (always available)
//! - `SqliteStorage` - SQLite storage (requires `sqlite` feature)
//!
//! Rows are keyed by site: `(site_id, order_id)` for orders and
//! `(site_id, order_id, note_id)` for notes. Notes belong to their order and
//! go away with it.

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStorage;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

use async_trait::async_trait;
use storefront_api::{Order, OrderId, OrderNote, SiteId};
use thiserror::Error;

/// Errors produced by [`StorageManager`] operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying SQLite failure.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// Internal lock was poisoned by a panicked thread.
    #[error("storage lock poisoned")]
    LockPoisoned,

    /// A stored row could not be turned back into an entity.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Persistence contract used by the stores.
///
/// Implementations serialize access internally and must be usable behind
/// `Arc<dyn StorageManager>`.
#[async_trait]
pub trait StorageManager: Send + Sync {
    /// Inserts the order or replaces the stored copy wholesale.
    async fn upsert_order(&self, order: &Order) -> Result<()>;

    async fn upsert_orders(&self, orders: &[Order]) -> Result<()>;

    async fn load_order(&self, site_id: SiteId, order_id: OrderId) -> Result<Option<Order>>;

    /// All stored orders of a site, newest first.
    async fn load_orders(&self, site_id: SiteId) -> Result<Vec<Order>>;

    /// Removes every order of a site together with its notes. Returns the
    /// number of orders removed.
    async fn delete_orders(&self, site_id: SiteId) -> Result<u64>;

    /// Inserts or replaces a note. Returns `false` (and stores nothing) when
    /// the parent order is not stored.
    async fn upsert_order_note(&self, note: &OrderNote) -> Result<bool>;

    /// Upserts notes whose parent order is stored. Returns how many were kept.
    async fn upsert_order_notes(&self, notes: &[OrderNote]) -> Result<usize>;

    /// Notes of one order, newest first.
    async fn load_order_notes(&self, site_id: SiteId, order_id: OrderId)
        -> Result<Vec<OrderNote>>;

    /// Drops everything.
    async fn reset(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn StorageManager) {}
    }

    #[test]
    fn lock_poisoned_displays() {
        assert_eq!(StorageError::LockPoisoned.to_string(), "storage lock poisoned");
    }
}
