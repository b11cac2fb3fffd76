use std::sync::Arc;

use storefront_api::{Network, OrderStatsRemote};

use super::{ignore_foreign, Spawner, Store};
use crate::action::{Action, ActionFamily, OrderStatsAction};
use crate::error::StoreError;

/// Serves [`OrderStatsAction`]s.
///
/// Stats are rebuilt on every fetch and handed straight to the caller; nothing
/// is written to local storage.
pub struct OrderStatsStore {
    remote: OrderStatsRemote,
    spawner: Spawner,
}

impl OrderStatsStore {
    pub fn new(network: Arc<dyn Network>) -> Self {
        Self {
            remote: OrderStatsRemote::new(network),
            spawner: Spawner::current(),
        }
    }
}

impl Store for OrderStatsStore {
    fn family(&self) -> ActionFamily {
        ActionFamily::OrderStats
    }

    fn on_action(&self, action: Action) {
        let action = match action {
            Action::OrderStats(action) => action,
            other => return ignore_foreign(self.family(), &other),
        };
        let name = action.name();

        match action {
            OrderStatsAction::RetrieveOrderStats {
                site_id,
                granularity,
                latest_date_to_include,
                quantity,
                on_completion,
            } => {
                let remote = self.remote.clone();
                self.spawner.perform(
                    name,
                    async move {
                        let stats = remote
                            .load_order_stats(site_id, granularity, latest_date_to_include, quantity)
                            .await?;
                        tracing::info!(site_id, %granularity, items = stats.items.len(), "Order stats retrieved");
                        Ok::<_, StoreError>(stats)
                    },
                    on_completion,
                );
            }
        }
    }
}
