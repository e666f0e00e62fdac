//! Product entity.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};
use crate::value_objects::Money;

const ENTITY: &str = "Product";

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    id: EntityId,
    name: String,
    price: Money,
}

#[derive(Deserialize)]
struct ProductRecord {
    id: EntityId,
    name: String,
    price: Money,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.name, record.price)
    }
}

impl Product {
    /// Creates a product. Id and name are required; price must not be negative.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        if product.id.is_blank() {
            return Err(ValidationError::new(ENTITY, Field::Id, "Id is required"));
        }
        Self::validate_name(&product.name)?;
        Self::validate_price(price)?;
        Ok(product)
    }

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new(ENTITY, Field::Name, "Name is required"));
        }
        Ok(())
    }

    fn validate_price(price: Money) -> Result<(), ValidationError> {
        if price.is_negative() {
            return Err(ValidationError::new(
                ENTITY,
                Field::Price,
                "Price must not be negative",
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        Self::validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: Money) -> Result<(), ValidationError> {
        Self::validate_price(price)?;
        self.price = price;
        Ok(())
    }
}
