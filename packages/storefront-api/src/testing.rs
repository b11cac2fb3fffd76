//! Testing utilities: a [`Network`] that replays canned responses.
//!
//! Enable with the `testing` feature.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{NetworkError, Result};
use crate::network::{Network, Request};

#[derive(Debug, Clone)]
enum Simulated {
    Body(Vec<u8>),
    TransportError(String),
}

/// Mock network. Responses are registered by URL suffix and matched against
/// the request's site-scoped path (`sites/{site}/{path}`).
///
/// A request with nothing registered fails with
/// [`NetworkError::EmptyResponse`], mirroring a backend that never replied.
#[derive(Default, Clone)]
pub struct MockNetwork {
    responses: Arc<RwLock<HashMap<String, Simulated>>>,
    requests: Arc<RwLock<Vec<Request>>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies to requests whose path ends with `suffix` with `body`.
    pub fn simulate_response(&self, suffix: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.responses
            .write()
            .unwrap()
            .insert(suffix.into(), Simulated::Body(body.into()));
    }

    /// Fails requests whose path ends with `suffix` as if the connection dropped.
    pub fn simulate_transport_error(&self, suffix: impl Into<String>, message: impl Into<String>) {
        self.responses
            .write()
            .unwrap()
            .insert(suffix.into(), Simulated::TransportError(message.into()));
    }

    pub fn remove_all_simulated_responses(&self) {
        self.responses.write().unwrap().clear();
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.read().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl Network for MockNetwork {
    async fn response_data(&self, request: &Request) -> Result<Vec<u8>> {
        self.requests.write().unwrap().push(request.clone());

        let path = request.relative_path();
        let simulated = self
            .responses
            .read()
            .unwrap()
            .iter()
            .filter(|(suffix, _)| path.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, simulated)| simulated.clone());

        match simulated {
            Some(Simulated::Body(body)) => Ok(body),
            Some(Simulated::TransportError(message)) => Err(NetworkError::Transport(message)),
            None => Err(NetworkError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn longest_matching_suffix_wins() {
        let network = MockNetwork::new();
        network.simulate_response("orders", "list");
        network.simulate_response("orders/963/notes", "notes");

        let body = network
            .response_data(&Request::get(1, "orders/963/notes"))
            .await
            .unwrap();
        assert_eq!(body, b"notes");
        assert_eq!(network.request_count(), 1);
    }

    #[tokio::test]
    async fn unregistered_request_has_no_reply() {
        let network = MockNetwork::new();
        let err = network
            .response_data(&Request::get(1, "orders"))
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::EmptyResponse));
    }
}
