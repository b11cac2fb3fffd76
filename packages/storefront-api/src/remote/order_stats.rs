use std::sync::Arc;

use chrono::NaiveDateTime;

use super::Remote;
use crate::error::Result;
use crate::mapper::OrderStatsMapper;
use crate::network::{Network, Request};
use crate::types::{OrderStats, SiteId, StatGranularity};

/// Order statistics endpoint.
#[derive(Clone)]
pub struct OrderStatsRemote {
    remote: Remote,
}

impl OrderStatsRemote {
    pub fn new(network: Arc<dyn Network>) -> Self {
        Self {
            remote: Remote::new(network),
        }
    }

    /// Loads `quantity` buckets of `granularity`, the last one containing
    /// `latest_date_to_include`.
    pub async fn load_order_stats(
        &self,
        site_id: SiteId,
        granularity: StatGranularity,
        latest_date_to_include: NaiveDateTime,
        quantity: u32,
    ) -> Result<OrderStats> {
        let request = Request::get(site_id, "stats/orders/")
            .with_parameter("unit", granularity)
            .with_parameter("date", granularity.format_date(latest_date_to_include.date()))
            .with_parameter("quantity", quantity);
        self.remote.enqueue(request, OrderStatsMapper { site_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockNetwork;

    #[tokio::test]
    async fn sends_unit_date_and_quantity() {
        let network = MockNetwork::new();
        network.simulate_response("sites/123/stats/orders/", include_str!("../../fixtures/order-stats.json"));
        let remote = OrderStatsRemote::new(Arc::new(network.clone()));

        let latest = crate::date::parse("2018-06-23T17:06:55").unwrap();
        let stats = remote
            .load_order_stats(123, StatGranularity::Week, latest, 2)
            .await
            .unwrap();
        assert_eq!(stats.items.len(), 2);

        let request = &network.requests()[0];
        assert_eq!(
            request.relative_url(),
            "sites/123/stats/orders/?unit=week&date=2018-W25&quantity=2"
        );
    }
}
