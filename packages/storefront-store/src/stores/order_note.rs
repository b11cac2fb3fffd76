use std::sync::Arc;

use storefront_api::{Network, OrdersRemote};

use super::{ignore_foreign, Spawner, Store};
use crate::action::{Action, ActionFamily, OrderNoteAction};
use crate::error::StoreError;
use crate::storage::StorageManager;

/// Serves [`OrderNoteAction`]s.
///
/// Notes are only stored under an order that is already stored; notes of
/// unknown orders are still returned to the caller. A failed upsert fails the
/// action with [`StoreError::Storage`].
pub struct OrderNoteStore {
    remote: OrdersRemote,
    storage: Arc<dyn StorageManager>,
    spawner: Spawner,
}

impl OrderNoteStore {
    pub fn new(network: Arc<dyn Network>, storage: Arc<dyn StorageManager>) -> Self {
        Self {
            remote: OrdersRemote::new(network),
            storage,
            spawner: Spawner::current(),
        }
    }
}

impl Store for OrderNoteStore {
    fn family(&self) -> ActionFamily {
        ActionFamily::OrderNote
    }

    fn on_action(&self, action: Action) {
        let action = match action {
            Action::OrderNote(action) => action,
            other => return ignore_foreign(self.family(), &other),
        };
        let name = action.name();
        let remote = self.remote.clone();
        let storage = self.storage.clone();

        match action {
            OrderNoteAction::RetrieveOrderNotes {
                site_id,
                order_id,
                on_completion,
            } => self.spawner.perform(
                name,
                async move {
                    let notes = remote.load_order_notes(site_id, order_id).await?;
                    let kept = storage.upsert_order_notes(&notes).await?;
                    if kept < notes.len() {
                        tracing::warn!(
                            site_id,
                            order_id,
                            skipped = notes.len() - kept,
                            "Order not stored; notes not persisted"
                        );
                    }
                    Ok::<_, StoreError>(notes)
                },
                on_completion,
            ),

            OrderNoteAction::AddOrderNote {
                site_id,
                order_id,
                is_customer_note,
                note,
                on_completion,
            } => self.spawner.perform(
                name,
                async move {
                    let note = remote
                        .add_order_note(site_id, order_id, is_customer_note, &note)
                        .await?;
                    if !storage.upsert_order_note(&note).await? {
                        tracing::warn!(
                            site_id,
                            order_id,
                            note_id = note.note_id,
                            "Order not stored; new note not persisted"
                        );
                    }
                    tracing::info!(site_id, order_id, is_customer_note, "Order note added");
                    Ok::<_, StoreError>(note)
                },
                on_completion,
            ),
        }
    }
}
