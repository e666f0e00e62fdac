//! Domain layer for the checkout sample.
//!
//! This crate provides:
//! - Value objects ([`Money`], [`Address`]) and entities ([`Customer`],
//!   [`Product`], [`Order`], [`OrderItem`]) that validate their invariants on
//!   construction and report failures as [`ValidationError`]
//! - [`DomainEvent`], the tagged union published through an
//!   [`events::EventDispatcher`], and the handlers that subscribe to it
//! - Domain services and factories
//! - Repository contracts implemented by the persistence layer

pub mod checkout;
pub mod customer;
pub mod error;
pub mod event;
pub mod product;
pub mod repository;
pub mod value_objects;

pub use checkout::{Order, OrderItem, OrderService};
pub use common::EntityId;
pub use customer::{
    Address, AnnounceCustomerCreatedHandler, Customer, CustomerFactory, CustomerService,
    LogAddressChangedHandler, LogCustomerCreatedHandler,
};
pub use error::{DomainError, Field, ValidationError};
pub use event::{
    CustomerAddressChangedData, CustomerCreatedData, DomainEvent, DomainEventKind,
    ProductCreatedData,
};
pub use product::{Product, ProductService, SendEmailOnProductCreatedHandler};
pub use repository::{
    CustomerRepository, OrderRepository, ProductRepository, Repository, RepositoryError,
};
pub use value_objects::Money;
