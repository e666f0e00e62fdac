//! Order aggregate.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};
use crate::value_objects::Money;

use super::OrderItem;

const ENTITY: &str = "Order";

/// Order aggregate root.
///
/// An order belongs to a customer and always holds at least one item. Items
/// keep the order in which they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

#[derive(Deserialize)]
struct OrderRecord {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = ValidationError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.customer_id, record.items)
    }
}

impl Order {
    /// Creates an order.
    ///
    /// Checks, in order: id present, customer id present, at least one item.
    pub fn new(
        id: impl Into<EntityId>,
        customer_id: impl Into<EntityId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_blank() {
            return Err(ValidationError::new(ENTITY, Field::Id, "Id is required"));
        }
        if self.customer_id.is_blank() {
            return Err(ValidationError::new(
                ENTITY,
                Field::CustomerId,
                "CustomerId is required",
            ));
        }
        if self.items.is_empty() {
            return Err(ValidationError::new(
                ENTITY,
                Field::Items,
                "Items are required",
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn customer_id(&self) -> &EntityId {
        &self.customer_id
    }

    /// Returns the items in the order they were added.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of every item's unit price times its quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Appends an item.
    ///
    /// The item was validated when it was built, and adding can't empty the
    /// order, so nothing is re-checked here.
    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> OrderItem {
        OrderItem::new(id, format!("Item {id}"), Money::from_cents(price), "p1", quantity).unwrap()
    }

    #[test]
    fn test_empty_id_fails() {
        let err = Order::new("", "123", vec![]).unwrap_err();
        assert_eq!(err.field, Field::Id);
        assert_eq!(err.to_string(), "Id is required");
    }

    #[test]
    fn test_empty_customer_id_fails() {
        let err = Order::new("123", "", vec![]).unwrap_err();
        assert_eq!(err.field, Field::CustomerId);
        assert_eq!(err.to_string(), "CustomerId is required");
    }

    #[test]
    fn test_empty_items_fails() {
        let err = Order::new("123", "123", vec![]).unwrap_err();
        assert_eq!(err.field, Field::Items);
        assert_eq!(err.to_string(), "Items are required");
    }

    #[test]
    fn test_calculate_total() {
        let item1 = item("i1", 100, 2);
        let item2 = item("i2", 200, 2);

        let order = Order::new("o1", "c1", vec![item1.clone()]).unwrap();
        assert_eq!(order.total().cents(), 200);

        let order2 = Order::new("o2", "c2", vec![item1, item2]).unwrap();
        assert_eq!(order2.total().cents(), 600);
    }

    #[test]
    fn test_add_item_updates_total() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 100, 2)]).unwrap();
        order.add_item(item("i2", 200, 2));

        assert_eq!(order.item_count(), 2);
        assert_eq!(order.total().cents(), 600);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut order = Order::new("o1", "c1", vec![item("b", 1, 1)]).unwrap();
        order.add_item(item("a", 1, 1));
        order.add_item(item("c", 1, 1));

        let ids: Vec<_> = order.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_serialization() {
        let order = Order::new("o1", "c1", vec![item("i1", 100, 2)]).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, order);
        assert_eq!(deserialized.total().cents(), 200);
    }

    #[test]
    fn test_deserialize_rejects_empty_items() {
        let err = serde_json::from_str::<Order>(r#"{"id":"o1","customer_id":"c1","items":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Items are required"));

        let err = serde_json::from_str::<Order>(r#"{"id":"","customer_id":"c1","items":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Id is required"));
    }

    #[test]
    fn test_total_saturates_for_large_prices() {
        let order = Order::new("o1", "c1", vec![item("i1", i64::MAX / 2 + 1, 2)]).unwrap();
        assert_eq!(order.total().cents(), i64::MAX);

        let mut order = Order::new("o2", "c1", vec![item("i1", i64::MAX, 1)]).unwrap();
        order.add_item(item("i2", 1, 1));
        assert_eq!(order.total().cents(), i64::MAX);
    }
}
