//! Repository implementations for the checkout domain.
//!
//! - [`memory`]: in-memory repositories for tests and local runs
//! - [`postgres`]: PostgreSQL repositories backed by `sqlx`
//! - [`config`]: database configuration read from the environment
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod memory;
pub mod postgres;
pub mod telemetry;

pub use config::DatabaseConfig;
pub use memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryRepository, StoredEntity,
};
pub use postgres::{
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
};

pub(crate) fn record_operation(entity: &'static str, op: &'static str) {
    metrics::counter!("repository_operations_total", "entity" => entity, "op" => op).increment(1);
}
