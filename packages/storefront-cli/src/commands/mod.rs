//! Subcommand drivers. Each one builds an action, dispatches it and prints
//! what the store reports back.

pub mod notes;
pub mod orders;
pub mod stats;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use storefront_api::SiteId;
use storefront_store::{completion, Action, Callback, Dispatcher, StorageManager};

/// Everything a subcommand needs.
pub struct CommandContext {
    /// From `--site` or `STOREFRONT_SITE_ID`.
    pub site_id: Option<SiteId>,
    pub dispatcher: Dispatcher,
    pub storage: Arc<dyn StorageManager>,
}

impl CommandContext {
    pub fn site(&self) -> Result<SiteId> {
        self.site_id
            .context("Pass --site or set STOREFRONT_SITE_ID")
    }

    /// Dispatches the action built by `build` and waits for its outcome.
    pub async fn request<T: Send + 'static>(
        &self,
        build: impl FnOnce(Callback<T>) -> Action,
    ) -> Result<T> {
        let (on_completion, outcome) = completion();
        let action = build(on_completion);
        let name = action.name();

        if !self.dispatcher.dispatch(action).is_handled() {
            bail!("no store handles `{name}`");
        }
        let result = outcome
            .await
            .with_context(|| format!("`{name}` was dropped before completing"))?;
        Ok(result?)
    }
}
