//! Domain events published through the event dispatcher.

use chrono::{DateTime, Utc};
use common::EntityId;
use events::Event;
use serde::{Deserialize, Serialize};

use crate::customer::{Address, Customer};
use crate::product::Product;
use crate::value_objects::Money;

/// Discriminant of [`DomainEvent`], used as the dispatcher key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainEventKind {
    CustomerCreated,
    CustomerAddressChanged,
    ProductCreated,
}

impl DomainEventKind {
    /// Returns the event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainEventKind::CustomerCreated => "CustomerCreated",
            DomainEventKind::CustomerAddressChanged => "CustomerAddressChanged",
            DomainEventKind::ProductCreated => "ProductCreated",
        }
    }
}

impl std::fmt::Display for DomainEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events that can occur in the checkout domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    /// A customer was registered.
    CustomerCreated(CustomerCreatedData),

    /// A customer's address was replaced.
    CustomerAddressChanged(CustomerAddressChangedData),

    /// A product was created.
    ProductCreated(ProductCreatedData),
}

impl Event for DomainEvent {
    type Kind = DomainEventKind;

    fn kind(&self) -> DomainEventKind {
        match self {
            DomainEvent::CustomerCreated(_) => DomainEventKind::CustomerCreated,
            DomainEvent::CustomerAddressChanged(_) => DomainEventKind::CustomerAddressChanged,
            DomainEvent::ProductCreated(_) => DomainEventKind::ProductCreated,
        }
    }

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::CustomerCreated(data) => data.occurred_on,
            DomainEvent::CustomerAddressChanged(data) => data.occurred_on,
            DomainEvent::ProductCreated(data) => data.occurred_on,
        }
    }
}

/// Data for CustomerCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreatedData {
    pub customer_id: EntityId,
    pub name: String,

    /// When the event was created.
    pub occurred_on: DateTime<Utc>,
}

/// Data for CustomerAddressChanged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddressChangedData {
    pub customer_id: EntityId,
    pub name: String,

    /// The new address.
    pub address: Address,

    /// When the event was created.
    pub occurred_on: DateTime<Utc>,
}

/// Data for ProductCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreatedData {
    pub product_id: EntityId,
    pub name: String,
    pub price: Money,

    /// When the event was created.
    pub occurred_on: DateTime<Utc>,
}

// Event constructors
impl DomainEvent {
    /// Creates a CustomerCreated event for `customer`.
    pub fn customer_created(customer: &Customer) -> Self {
        DomainEvent::CustomerCreated(CustomerCreatedData {
            customer_id: customer.id().clone(),
            name: customer.name().to_string(),
            occurred_on: Utc::now(),
        })
    }

    /// Creates a CustomerAddressChanged event for `customer` moving to `address`.
    pub fn customer_address_changed(customer: &Customer, address: &Address) -> Self {
        DomainEvent::CustomerAddressChanged(CustomerAddressChangedData {
            customer_id: customer.id().clone(),
            name: customer.name().to_string(),
            address: address.clone(),
            occurred_on: Utc::now(),
        })
    }

    /// Creates a ProductCreated event for `product`.
    pub fn product_created(product: &Product) -> Self {
        DomainEvent::ProductCreated(ProductCreatedData {
            product_id: product.id().clone(),
            name: product.name().to_string(),
            price: product.price(),
            occurred_on: Utc::now(),
        })
    }
}
