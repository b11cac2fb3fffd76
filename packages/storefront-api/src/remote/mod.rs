//! Endpoint wrappers. Each call builds one [`Request`], performs exactly one
//! network attempt and hands the body to a [`Mapper`].

mod order_stats;
mod orders;

pub use order_stats::OrderStatsRemote;
pub use orders::OrdersRemote;

use std::sync::Arc;

use crate::error::Result;
use crate::mapper::Mapper;
use crate::network::{Network, Request};

/// Shared base of every remote.
#[derive(Clone)]
pub struct Remote {
    network: Arc<dyn Network>,
}

impl Remote {
    /// Page size used when the caller does not pick one.
    pub const DEFAULT_PAGE_SIZE: u32 = 25;
    pub const DEFAULT_PAGE: u32 = 1;

    pub fn new(network: Arc<dyn Network>) -> Self {
        Self { network }
    }

    pub async fn enqueue<M: Mapper>(&self, request: Request, mapper: M) -> Result<M::Output> {
        let data = self.network.response_data(&request).await?;
        mapper.map(&data)
    }
}
