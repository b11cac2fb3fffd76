//! Error types for stores and the dispatcher.

use storefront_api::NetworkError;
use thiserror::Error;

use crate::action::ActionFamily;
use crate::storage::StorageError;

/// Outcome error handed to an action's completion callback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport or decoding failure of the remote call.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Local storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The action was dispatched with no Tokio runtime to run it on.
    #[error("no Tokio runtime available to run the action")]
    NoRuntime,
}

/// Registration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("a store is already registered for `{family}` actions")]
    StoreAlreadyRegistered { family: ActionFamily },
}
