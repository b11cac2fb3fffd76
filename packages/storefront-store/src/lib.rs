//! Action-driven data layer for storefront orders.
//!
//! Callers build an [`Action`] carrying its parameters and a completion
//! callback, then hand it to a [`Dispatcher`]. The dispatcher routes it to
//! the one store registered for its family; the store talks to the backend
//! through a [`storefront_api::Network`], persists what came back through a
//! [`StorageManager`], and fires the callback.
//!
//! ```ignore
//! let dispatcher = Dispatcher::with_default_stores(network, storage);
//!
//! let (on_completion, outcome) = completion();
//! dispatcher.dispatch(OrderAction::RetrieveOrder { site_id, order_id, on_completion }.into());
//! let order = outcome.await??;
//! ```

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod storage;
pub mod stores;

#[cfg(test)]
mod test_support;

pub use action::{
    completion, Action, ActionFamily, Callback, OrderAction, OrderNoteAction, OrderStatsAction,
};
pub use dispatcher::{Dispatched, Dispatcher};
pub use error::{DispatchError, StoreError};
pub use storage::{MemoryStorage, StorageError, StorageManager};
#[cfg(feature = "sqlite")]
pub use storage::SqliteStorage;
pub use stores::{OrderNoteStore, OrderStatsStore, OrderStore, Store};
