//! Order line item.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};
use crate::value_objects::Money;

const ENTITY: &str = "OrderItem";

/// A line in an order: a product, its unit price and the quantity ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderItemRecord")]
pub struct OrderItem {
    id: EntityId,
    name: String,

    /// Price per unit.
    price: Money,

    product_id: EntityId,
    quantity: u32,
}

#[derive(Deserialize)]
struct OrderItemRecord {
    id: EntityId,
    name: String,
    price: Money,
    product_id: EntityId,
    quantity: u32,
}

impl TryFrom<OrderItemRecord> for OrderItem {
    type Error = ValidationError;

    fn try_from(record: OrderItemRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.id,
            record.name,
            record.price,
            record.product_id,
            record.quantity,
        )
    }
}

impl OrderItem {
    /// Creates an order item. The quantity must be greater than zero.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<EntityId>,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::new(
                ENTITY,
                Field::Quantity,
                "Quantity must be greater than 0",
            ));
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the line total (unit price * quantity).
    pub fn total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}
