//! Storefront REST API client.
//!
//! Talks to site-scoped endpoints (`sites/{site_id}/{resource}`) and decodes
//! their JSON into strongly-typed entities. The site identifier is never part
//! of the payloads, so mappers inject it.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_api::{Credentials, HttpNetwork, OrdersRemote};
//!
//! let network = HttpNetwork::new(Credentials::new("https://api.example.com/rest/v1", token))?;
//! let remote = OrdersRemote::new(Arc::new(network));
//!
//! let note = remote.add_order_note(123, 963, false, "Packed and ready").await?;
//! println!("note #{} added", note.note_id);
//! ```

pub mod date;
pub mod error;
pub mod mapper;
pub mod network;
pub mod remote;
pub mod secret;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{NetworkError, Result};
pub use mapper::Mapper;
pub use network::{Credentials, HttpNetwork, Network, Request};
pub use remote::{OrderStatsRemote, OrdersRemote, Remote};
pub use secret::SecretString;
pub use types::*;
