use super::{decode, Envelope, Mapper};
use crate::error::Result;
use crate::types::{Order, SiteId};

/// Maps a single-order document (`load order`, `update order`).
#[derive(Debug, Clone, Copy)]
pub struct OrderMapper {
    pub site_id: SiteId,
}

impl Mapper for OrderMapper {
    type Output = Order;

    fn map(&self, response: &[u8]) -> Result<Order> {
        let mut order = decode::<Envelope<Order>>(response)?.data;
        order.site_id = self.site_id;
        Ok(order)
    }
}

/// Maps the order list endpoint.
#[derive(Debug, Clone, Copy)]
pub struct OrderListMapper {
    pub site_id: SiteId,
}

impl Mapper for OrderListMapper {
    type Output = Vec<Order>;

    fn map(&self, response: &[u8]) -> Result<Vec<Order>> {
        let mut orders = decode::<Envelope<Vec<Order>>>(response)?.data;
        for order in &mut orders {
            order.site_id = self.site_id;
        }
        Ok(orders)
    }
}
