use std::sync::Arc;

use storefront_api::{Network, OrdersRemote};

use super::{ignore_foreign, Spawner, Store};
use crate::action::{Action, ActionFamily, OrderAction};
use crate::error::StoreError;
use crate::storage::StorageManager;

/// Serves [`OrderAction`]s and owns the stored orders.
///
/// Entities fetched from the network are upserted before the callback fires.
/// A failed upsert fails the action with [`StoreError::Storage`]; the remote
/// side of the call has still happened.
pub struct OrderStore {
    remote: OrdersRemote,
    storage: Arc<dyn StorageManager>,
    spawner: Spawner,
}

impl OrderStore {
    pub fn new(network: Arc<dyn Network>, storage: Arc<dyn StorageManager>) -> Self {
        Self {
            remote: OrdersRemote::new(network),
            storage,
            spawner: Spawner::current(),
        }
    }
}

impl Store for OrderStore {
    fn family(&self) -> ActionFamily {
        ActionFamily::Order
    }

    fn on_action(&self, action: Action) {
        let action = match action {
            Action::Order(action) => action,
            other => return ignore_foreign(self.family(), &other),
        };
        let name = action.name();
        let remote = self.remote.clone();
        let storage = self.storage.clone();

        match action {
            OrderAction::SynchronizeOrders {
                site_id,
                status,
                page,
                page_size,
                on_completion,
            } => self.spawner.perform(
                name,
                async move {
                    let orders = remote
                        .load_all_orders(site_id, status.as_ref(), page, page_size)
                        .await?;
                    storage.upsert_orders(&orders).await?;
                    tracing::info!(site_id, page, count = orders.len(), "Orders synchronized");
                    Ok::<_, StoreError>(orders)
                },
                on_completion,
            ),

            OrderAction::RetrieveOrder {
                site_id,
                order_id,
                on_completion,
            } => self.spawner.perform(
                name,
                async move {
                    let order = remote.load_order(site_id, order_id).await?;
                    storage.upsert_order(&order).await?;
                    Ok::<_, StoreError>(order)
                },
                on_completion,
            ),

            OrderAction::UpdateOrder {
                site_id,
                order_id,
                status,
                on_completion,
            } => self.spawner.perform(
                name,
                async move {
                    let order = remote.update_order(site_id, order_id, &status).await?;
                    storage.upsert_order(&order).await?;
                    tracing::info!(site_id, order_id, status = %order.status, "Order status updated");
                    Ok::<_, StoreError>(order)
                },
                on_completion,
            ),

            OrderAction::ResetStoredOrders {
                site_id,
                on_completion,
            } => self.spawner.perform(
                name,
                async move {
                    let removed = storage.delete_orders(site_id).await?;
                    tracing::info!(site_id, removed, "Stored orders reset");
                    Ok::<_, StoreError>(removed)
                },
                on_completion,
            ),
        }
    }
}
