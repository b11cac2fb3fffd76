//! Stores execute one family of actions against the network and local storage.
//!
//! # Key Properties
//!
//! - **One action = one network attempt**: no retries
//! - **Errors persist nothing**: storage is only written after a successful reply
//! - **Disjoint ownership**: each store owns its entity types, no cross-store locking

mod order;
mod order_note;
mod order_stats;

pub use order::OrderStore;
pub use order_note::OrderNoteStore;
pub use order_stats::OrderStatsStore;

use std::future::Future;

use tokio::runtime::Handle;

use crate::action::{Action, ActionFamily, Callback};
use crate::error::StoreError;

/// Handler for one [`ActionFamily`].
pub trait Store: Send + Sync {
    fn family(&self) -> ActionFamily;

    /// Starts executing `action` and returns immediately.
    ///
    /// Network work runs on the Tokio runtime the store was built in, or else
    /// on the caller's runtime; the action's callback fires once it settles.
    /// Without either, the callback fails with [`StoreError::NoRuntime`].
    fn on_action(&self, action: Action);
}

/// Runtime a store spawns its work on.
#[derive(Clone)]
pub(crate) struct Spawner {
    handle: Option<Handle>,
}

impl Spawner {
    /// Captures the runtime of the calling thread, if there is one.
    pub(crate) fn current() -> Self {
        Self {
            handle: Handle::try_current().ok(),
        }
    }

    /// Runs `work` on the runtime and hands its outcome to `on_completion`.
    pub(crate) fn perform<T, F>(&self, action: &'static str, work: F, on_completion: Callback<T>)
    where
        T: Send + 'static,
        F: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        let handle = match self.handle.clone().or_else(|| Handle::try_current().ok()) {
            Some(handle) => handle,
            None => {
                tracing::error!(action, "No Tokio runtime to run action on");
                on_completion(Err(StoreError::NoRuntime));
                return;
            }
        };

        handle.spawn(async move {
            let result = work.await;
            match &result {
                Ok(_) => tracing::debug!(action, "Action completed"),
                Err(error) => tracing::warn!(action, %error, "Action failed"),
            }
            on_completion(result);
        });
    }
}

/// Logs an action that was routed to the wrong store.
pub(crate) fn ignore_foreign(store: ActionFamily, action: &Action) {
    tracing::warn!(
        %store,
        family = %action.family(),
        action = action.name(),
        "Store received an action it does not handle"
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront_api::testing::MockNetwork;

    use crate::action::{completion, OrderAction};
    use crate::dispatcher::Dispatcher;
    use crate::error::StoreError;
    use crate::storage::MemoryStorage;

    fn reset_action() -> (crate::Action, tokio::sync::oneshot::Receiver<Result<u64, StoreError>>) {
        let (on_completion, rx) = completion();
        let action = OrderAction::ResetStoredOrders {
            site_id: 123,
            on_completion,
        };
        (action.into(), rx)
    }

    #[test]
    fn dispatch_without_runtime_fails_the_callback() {
        let dispatcher = Dispatcher::with_default_stores(
            Arc::new(MockNetwork::new()),
            Arc::new(MemoryStorage::new()),
        );
        let (action, mut rx) = reset_action();

        assert!(dispatcher.dispatch(action).is_handled());
        assert!(matches!(rx.try_recv(), Ok(Err(StoreError::NoRuntime))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn dispatch_from_plain_thread_uses_the_build_runtime() {
        let dispatcher = Dispatcher::with_default_stores(
            Arc::new(MockNetwork::new()),
            Arc::new(MemoryStorage::new()),
        );
        let (action, rx) = reset_action();

        let handled = std::thread::spawn(move || dispatcher.dispatch(action).is_handled())
            .join()
            .unwrap();

        assert!(handled);
        assert_eq!(rx.await.unwrap().unwrap(), 0);
    }
}
