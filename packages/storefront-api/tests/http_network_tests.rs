// HttpNetwork against a local axum server

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use storefront_api::{
    Credentials, HttpNetwork, Network, NetworkError, OrderStatsRemote, OrdersRemote, Request,
    StatGranularity,
};

const TOKEN: &str = "s3cr3t";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/sites/123/orders/963",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (
                        StatusCode::FORBIDDEN,
                        include_str!("../fixtures/generic_error.json"),
                    );
                }
                (StatusCode::OK, include_str!("../fixtures/order.json"))
            }),
        )
        .route(
            "/sites/123/orders/404",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    r#"{"code": "woocommerce_rest_shop_order_invalid_id", "message": "Invalid ID.", "data": {"status": 404}}"#,
                )
            }),
        )
        .route(
            "/sites/123/orders/500",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route("/sites/123/empty", get(|| async { "" }))
        .route(
            "/sites/123/stats/orders/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let expected = params.get("unit").map(String::as_str) == Some("month")
                    && params.get("date").map(String::as_str) == Some("2018-06")
                    && params.get("quantity").map(String::as_str) == Some("2");
                if expected {
                    (StatusCode::OK, include_str!("../fixtures/order-stats.json"))
                } else {
                    (StatusCode::BAD_REQUEST, r#"{"error": "bad_request", "message": "unexpected query"}"#)
                }
            }),
        )
        .route(
            "/sites/123/orders/963/notes",
            post(|Json(body): Json<Value>| async move {
                if body["note"] == "Packed" && body["customer_note"] == false {
                    (StatusCode::CREATED, include_str!("../fixtures/new-order-note.json"))
                } else {
                    (StatusCode::BAD_REQUEST, r#"{"error": "bad_request", "message": "unexpected body"}"#)
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn network(addr: SocketAddr, token: &str) -> Arc<HttpNetwork> {
    Arc::new(HttpNetwork::new(Credentials::new(format!("http://{addr}"), token)).unwrap())
}

#[tokio::test]
async fn loads_order_with_bearer_token() {
    let addr = spawn_server().await;
    let remote = OrdersRemote::new(network(addr, TOKEN));

    let order = remote.load_order(123, 963).await.unwrap();
    assert_eq!(order.site_id, 123);
    assert_eq!(order.order_id, 963);
}

#[tokio::test]
async fn error_status_with_error_document_is_remote_error() {
    let addr = spawn_server().await;

    let err = OrdersRemote::new(network(addr, "wrong"))
        .load_order(123, 963)
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Remote { ref code, .. } if code == "unauthorized"));

    let err = OrdersRemote::new(network(addr, TOKEN))
        .load_order(123, 404)
        .await
        .unwrap_err();
    assert!(
        matches!(err, NetworkError::Remote { ref code, .. } if code == "woocommerce_rest_shop_order_invalid_id")
    );
}

#[tokio::test]
async fn error_status_with_plain_body_is_http_error() {
    let addr = spawn_server().await;

    let err = OrdersRemote::new(network(addr, TOKEN))
        .load_order(123, 500)
        .await
        .unwrap_err();
    match err {
        NetworkError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn empty_body_is_empty_response() {
    let addr = spawn_server().await;

    let err = network(addr, TOKEN)
        .response_data(&Request::get(123, "empty"))
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::EmptyResponse));
}

#[tokio::test]
async fn stats_query_reaches_server() {
    let addr = spawn_server().await;
    let remote = OrderStatsRemote::new(network(addr, TOKEN));
    let latest = storefront_api::date::parse("2018-06-23T17:06:55").unwrap();

    let stats = remote
        .load_order_stats(123, StatGranularity::Month, latest, 2)
        .await
        .unwrap();
    assert_eq!(stats.items.len(), 2);
}

#[tokio::test]
async fn add_note_posts_json_body() {
    let addr = spawn_server().await;
    let remote = OrdersRemote::new(network(addr, TOKEN));

    let note = remote.add_order_note(123, 963, false, "Packed").await.unwrap();
    assert_eq!(note.note_id, 2261);
    assert_eq!(note.order_id, 963);
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = OrdersRemote::new(network(addr, TOKEN))
        .load_order(123, 963)
        .await
        .unwrap_err();
    assert!(err.is_transport(), "got: {err:?}");
}
