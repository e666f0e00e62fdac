//! Order domain service.

use common::EntityId;

use crate::customer::Customer;
use crate::error::ValidationError;
use crate::value_objects::Money;

use super::{Order, OrderItem};

/// Operations on orders that don't belong to a single order.
pub struct OrderService;

impl OrderService {
    /// Returns the combined total of `orders`.
    pub fn total(orders: &[Order]) -> Money {
        orders.iter().map(Order::total).sum()
    }

    /// Places an order for `customer` and credits reward points.
    ///
    /// The customer earns one point for every two cents of the order total,
    /// rounded down.
    #[tracing::instrument(skip(customer, items), fields(customer_id = %customer.id()))]
    pub fn place_order(
        customer: &mut Customer,
        items: Vec<OrderItem>,
    ) -> Result<Order, ValidationError> {
        let order = Order::new(EntityId::generate(), customer.id().clone(), items)?;

        let points = u64::try_from(order.total().cents()).unwrap_or(0) / 2;
        customer.add_reward_points(points);
        tracing::debug!(order_id = %order.id(), points, "order placed");

        Ok(order)
    }
}
