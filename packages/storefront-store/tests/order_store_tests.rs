//! OrderStore end to end: backend replies through to SQLite.

#![cfg(feature = "sqlite")]

use std::sync::Arc;

use storefront_api::testing::MockNetwork;
use storefront_api::{NetworkError, Order, OrderStatus};
use storefront_store::{
    completion, Dispatcher, OrderAction, SqliteStorage, StorageManager, StoreError,
};

const SITE_ID: i64 = 123;

async fn harness() -> (MockNetwork, Arc<SqliteStorage>, Dispatcher) {
    let network = MockNetwork::new();
    let storage = Arc::new(SqliteStorage::in_memory().await.unwrap());
    let dispatcher = Dispatcher::with_default_stores(Arc::new(network.clone()), storage.clone());
    (network, storage, dispatcher)
}

async fn synchronize(
    dispatcher: &Dispatcher,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, StoreError> {
    let (on_completion, outcome) = completion();
    dispatcher.dispatch(
        OrderAction::SynchronizeOrders {
            site_id: SITE_ID,
            status,
            page: 1,
            page_size: 25,
            on_completion,
        }
        .into(),
    );
    outcome.await.unwrap()
}

#[tokio::test]
async fn synchronize_orders_stores_the_page() {
    let (network, storage, dispatcher) = harness().await;
    network.simulate_response(
        "orders",
        include_str!("../../storefront-api/fixtures/orders-load-all.json"),
    );

    let orders = synchronize(&dispatcher, None).await.unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders.iter().all(|order| order.site_id == SITE_ID));
    assert_eq!(
        orders[2].status,
        OrderStatus::Custom("awaiting-pickup".into())
    );

    let stored = storage.load_orders(SITE_ID).await.unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(
        network.requests()[0].relative_url(),
        "sites/123/orders?page=1&per_page=25"
    );
}

#[tokio::test]
async fn status_filter_is_forwarded() {
    let (network, _storage, dispatcher) = harness().await;
    network.simulate_response(
        "orders",
        include_str!("../../storefront-api/fixtures/orders-load-all.json"),
    );

    synchronize(&dispatcher, Some(OrderStatus::OnHold))
        .await
        .unwrap();

    assert!(network.requests()[0]
        .relative_url()
        .ends_with("status=on-hold"));
}

#[tokio::test]
async fn update_order_replaces_stored_copy() {
    let (network, storage, dispatcher) = harness().await;
    network.simulate_response(
        "orders/963",
        include_str!("../../storefront-api/fixtures/order.json"),
    );

    let (on_completion, outcome) = completion();
    dispatcher.dispatch(
        OrderAction::UpdateOrder {
            site_id: SITE_ID,
            order_id: 963,
            status: OrderStatus::Processing,
            on_completion,
        }
        .into(),
    );
    let order = outcome.await.unwrap().unwrap();

    let request = &network.requests()[0];
    assert_eq!(request.method.as_str(), "PUT");
    assert_eq!(
        request.body.clone().unwrap(),
        serde_json::json!({ "status": "processing" })
    );
    assert_eq!(storage.load_order(SITE_ID, 963).await.unwrap(), Some(order));
}

#[tokio::test]
async fn transport_failure_stores_nothing() {
    let (network, storage, dispatcher) = harness().await;
    network.simulate_transport_error("orders", "connection reset");

    let err = synchronize(&dispatcher, None).await.unwrap_err();

    assert!(matches!(err, StoreError::Network(NetworkError::Transport(_))));
    assert!(storage.load_orders(SITE_ID).await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_removes_only_this_sites_orders() {
    let (network, storage, dispatcher) = harness().await;
    network.simulate_response(
        "orders",
        include_str!("../../storefront-api/fixtures/orders-load-all.json"),
    );
    synchronize(&dispatcher, None).await.unwrap();

    let mut other_site = storage.load_order(SITE_ID, 963).await.unwrap().unwrap();
    other_site.site_id = 999;
    storage.upsert_order(&other_site).await.unwrap();

    let (on_completion, outcome) = completion();
    dispatcher.dispatch(
        OrderAction::ResetStoredOrders {
            site_id: SITE_ID,
            on_completion,
        }
        .into(),
    );

    assert_eq!(outcome.await.unwrap().unwrap(), 3);
    assert!(storage.load_orders(SITE_ID).await.unwrap().is_empty());
    assert_eq!(storage.load_orders(999).await.unwrap().len(), 1);
}
