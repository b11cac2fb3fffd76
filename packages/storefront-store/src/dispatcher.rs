//! Action dispatcher for routing actions to stores.
//!
//! The `Dispatcher` is an explicitly constructed registry, injected wherever
//! actions are issued. It is responsible for:
//! 1. Keeping the sole store of each [`ActionFamily`]
//! 2. Handing every dispatched action to that store, synchronously
//!
//! # Unrouted actions
//!
//! Dispatching an action whose family has no registered store is a no-op:
//! the action is dropped together with its callback, which therefore never
//! fires. The miss is logged and reported as [`Dispatched::Unhandled`].

use std::collections::HashMap;
use std::sync::Arc;

use storefront_api::Network;

use crate::action::{Action, ActionFamily};
use crate::error::DispatchError;
use crate::storage::StorageManager;
use crate::stores::{OrderNoteStore, OrderStatsStore, OrderStore, Store};

/// What [`Dispatcher::dispatch`] did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// Handed to the family's store.
    Handled(ActionFamily),
    /// No store registered; the action was dropped.
    Unhandled(ActionFamily),
}

impl Dispatched {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Routes actions to the store registered for their family.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::new()
///     .with_store(Arc::new(OrderStatsStore::new(network)))?;
///
/// let (on_completion, outcome) = completion();
/// dispatcher.dispatch(OrderStatsAction::RetrieveOrderStats { .., on_completion }.into());
/// let stats = outcome.await??;
/// ```
#[derive(Default)]
pub struct Dispatcher {
    stores: HashMap<ActionFamily, Arc<dyn Store>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with the order, order note and order stats stores wired to
    /// `network` and `storage`.
    pub fn with_default_stores(
        network: Arc<dyn Network>,
        storage: Arc<dyn StorageManager>,
    ) -> Self {
        let stores: [Arc<dyn Store>; 3] = [
            Arc::new(OrderStore::new(network.clone(), storage.clone())),
            Arc::new(OrderNoteStore::new(network.clone(), storage)),
            Arc::new(OrderStatsStore::new(network)),
        ];
        let mut dispatcher = Self::new();
        for store in stores {
            dispatcher.stores.insert(store.family(), store);
        }
        dispatcher
    }

    /// Register a store for its family.
    ///
    /// Fails if the family already has a store.
    pub fn register(&mut self, store: Arc<dyn Store>) -> Result<(), DispatchError> {
        let family = store.family();
        if self.stores.contains_key(&family) {
            return Err(DispatchError::StoreAlreadyRegistered { family });
        }
        tracing::debug!(%family, "Store registered");
        self.stores.insert(family, store);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_store(mut self, store: Arc<dyn Store>) -> Result<Self, DispatchError> {
        self.register(store)?;
        Ok(self)
    }

    /// Removes and returns the store serving `family`.
    pub fn unregister(&mut self, family: ActionFamily) -> Option<Arc<dyn Store>> {
        self.stores.remove(&family)
    }

    pub fn is_registered(&self, family: ActionFamily) -> bool {
        self.stores.contains_key(&family)
    }

    /// Hands `action` to its family's store.
    pub fn dispatch(&self, action: Action) -> Dispatched {
        let family = action.family();
        match self.stores.get(&family) {
            Some(store) => {
                tracing::debug!(%family, action = action.name(), "Dispatching action");
                store.on_action(action);
                Dispatched::Handled(family)
            }
            None => {
                tracing::warn!(
                    %family,
                    action = action.name(),
                    "No store registered for action; dropping it"
                );
                Dispatched::Unhandled(family)
            }
        }
    }
}
