//! Actions: one variant per operation, carrying its parameters and the
//! completion callback that receives the outcome.

use std::fmt;

use chrono::NaiveDateTime;
use storefront_api::{
    Order, OrderId, OrderNote, OrderStats, OrderStatus, SiteId, StatGranularity,
};
use tokio::sync::oneshot;

use crate::error::StoreError;

/// Completion callback. Invoked exactly once, from the task that ran the action.
pub type Callback<T> = Box<dyn FnOnce(Result<T, StoreError>) + Send + 'static>;

/// Builds a callback whose outcome can be awaited through the returned receiver.
///
/// ```ignore
/// let (on_completion, outcome) = completion();
/// dispatcher.dispatch(OrderAction::RetrieveOrder { site_id, order_id, on_completion }.into());
/// let order = outcome.await??;
/// ```
pub fn completion<T: Send + 'static>() -> (Callback<T>, oneshot::Receiver<Result<T, StoreError>>) {
    let (tx, rx) = oneshot::channel();
    let callback: Callback<T> = Box::new(move |result| {
        // The receiver may have gone away; nothing left to notify then.
        let _ = tx.send(result);
    });
    (callback, rx)
}

/// Routing key: every action family is served by exactly one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionFamily {
    Order,
    OrderNote,
    OrderStats,
}

impl fmt::Display for ActionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Order => "order",
            Self::OrderNote => "order_note",
            Self::OrderStats => "order_stats",
        })
    }
}

pub enum Action {
    Order(OrderAction),
    OrderNote(OrderNoteAction),
    OrderStats(OrderStatsAction),
}

impl Action {
    pub fn family(&self) -> ActionFamily {
        match self {
            Self::Order(_) => ActionFamily::Order,
            Self::OrderNote(_) => ActionFamily::OrderNote,
            Self::OrderStats(_) => ActionFamily::OrderStats,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Order(action) => action.name(),
            Self::OrderNote(action) => action.name(),
            Self::OrderStats(action) => action.name(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("family", &self.family())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

pub enum OrderAction {
    /// Fetches one page of orders and upserts them.
    SynchronizeOrders {
        site_id: SiteId,
        status: Option<OrderStatus>,
        page: u32,
        page_size: u32,
        on_completion: Callback<Vec<Order>>,
    },
    RetrieveOrder {
        site_id: SiteId,
        order_id: OrderId,
        on_completion: Callback<Order>,
    },
    /// Moves an order to a new status remotely, then stores the result.
    UpdateOrder {
        site_id: SiteId,
        order_id: OrderId,
        status: OrderStatus,
        on_completion: Callback<Order>,
    },
    /// Drops the site's stored orders (and their notes). No network call.
    ResetStoredOrders {
        site_id: SiteId,
        on_completion: Callback<u64>,
    },
}

impl OrderAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SynchronizeOrders { .. } => "synchronize_orders",
            Self::RetrieveOrder { .. } => "retrieve_order",
            Self::UpdateOrder { .. } => "update_order",
            Self::ResetStoredOrders { .. } => "reset_stored_orders",
        }
    }
}

pub enum OrderNoteAction {
    RetrieveOrderNotes {
        site_id: SiteId,
        order_id: OrderId,
        on_completion: Callback<Vec<OrderNote>>,
    },
    AddOrderNote {
        site_id: SiteId,
        order_id: OrderId,
        is_customer_note: bool,
        note: String,
        on_completion: Callback<OrderNote>,
    },
}

impl OrderNoteAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RetrieveOrderNotes { .. } => "retrieve_order_notes",
            Self::AddOrderNote { .. } => "add_order_note",
        }
    }
}

pub enum OrderStatsAction {
    RetrieveOrderStats {
        site_id: SiteId,
        granularity: StatGranularity,
        latest_date_to_include: NaiveDateTime,
        quantity: u32,
        on_completion: Callback<OrderStats>,
    },
}

impl OrderStatsAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RetrieveOrderStats { .. } => "retrieve_order_stats",
        }
    }
}

impl From<OrderAction> for Action {
    fn from(action: OrderAction) -> Self {
        Self::Order(action)
    }
}

impl From<OrderNoteAction> for Action {
    fn from(action: OrderNoteAction) -> Self {
        Self::OrderNote(action)
    }
}

impl From<OrderStatsAction> for Action {
    fn from(action: OrderStatsAction) -> Self {
        Self::OrderStats(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_follows_variant() {
        let (on_completion, _rx) = completion();
        let action: Action = OrderNoteAction::AddOrderNote {
            site_id: 1,
            order_id: 2,
            is_customer_note: false,
            note: "hi".into(),
            on_completion,
        }
        .into();

        assert_eq!(action.family(), ActionFamily::OrderNote);
        assert_eq!(action.name(), "add_order_note");
        assert!(format!("{action:?}").contains("add_order_note"));
    }

    #[tokio::test]
    async fn completion_delivers_outcome() {
        let (on_completion, rx) = completion::<u64>();
        on_completion(Ok(3));
        assert_eq!(rx.await.unwrap().unwrap(), 3);
    }
}
