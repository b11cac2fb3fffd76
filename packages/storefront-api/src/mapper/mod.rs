//! Mappers turn raw response bytes into domain entities.
//!
//! The storefront endpoints never include the site identifier in their
//! payloads, so each mapper carries it and stamps it onto what it decodes.

mod order;
mod order_note;
mod order_stats;

pub use order::{OrderListMapper, OrderMapper};
pub use order_note::{OrderNoteMapper, OrderNotesMapper};
pub use order_stats::OrderStatsMapper;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{NetworkError, Result};

/// Decodes one response body into `Output`.
pub trait Mapper: Send + Sync {
    type Output;

    fn map(&self, response: &[u8]) -> Result<Self::Output>;
}

/// Outer wrapper of order endpoints: the document lives under `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Parses `response` as JSON, surfacing error documents before shape decoding.
pub(crate) fn decode<T: DeserializeOwned>(response: &[u8]) -> Result<T> {
    let value = parse(response)?;
    serde_json::from_value(value).map_err(NetworkError::from)
}

pub(crate) fn parse(response: &[u8]) -> Result<Value> {
    if response.iter().all(u8::is_ascii_whitespace) {
        return Err(NetworkError::EmptyResponse);
    }
    let value: Value = serde_json::from_slice(response)?;
    if let Some(err) = remote_error(&value) {
        return Err(err);
    }
    Ok(value)
}

/// Recognises `{"error": .., "message": ..}` and `{"code": .., "message": ..}`.
pub(crate) fn remote_error(value: &Value) -> Option<NetworkError> {
    let object = value.as_object()?;
    let code = object
        .get("error")
        .or_else(|| object.get("code"))
        .and_then(Value::as_str)?;
    let message = object
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(NetworkError::Remote {
        code: code.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_an_empty_response() {
        assert!(matches!(parse(b""), Err(NetworkError::EmptyResponse)));
        assert!(matches!(parse(b"  \n"), Err(NetworkError::EmptyResponse)));
    }

    #[test]
    fn dotcom_error_document_is_recognised() {
        let body = br#"{"error": "unauthorized", "message": "Missing token."}"#;
        match parse(body) {
            Err(NetworkError::Remote { code, message }) => {
                assert_eq!(code, "unauthorized");
                assert_eq!(message, "Missing token.");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rest_error_document_is_recognised() {
        let body = br#"{"code": "woocommerce_rest_shop_order_invalid_id", "message": "Invalid ID.", "data": {"status": 404}}"#;
        let err = decode::<Envelope<Value>>(body).unwrap_err();
        assert!(matches!(err, NetworkError::Remote { ref code, .. } if code == "woocommerce_rest_shop_order_invalid_id"));
    }

    #[test]
    fn malformed_json_is_a_decoding_error() {
        assert!(matches!(parse(b"{\"data\":"), Err(NetworkError::Decoding(_))));
    }
}
