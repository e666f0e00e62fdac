//! Repository contracts implemented by the persistence layer.

use async_trait::async_trait;
use common::EntityId;
use thiserror::Error;

use crate::checkout::Order;
use crate::customer::Customer;
use crate::error::ValidationError;
use crate::product::Product;

/// Errors that can occur when reading or writing entities.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No entity with the requested id exists.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: EntityId },

    /// An entity with the same id is already stored.
    #[error("{entity} with id {id} already exists")]
    AlreadyExists { entity: &'static str, id: EntityId },

    /// Stored data no longer satisfies the entity's invariants.
    #[error("Stored {entity} is invalid: {source}")]
    Corrupted {
        entity: &'static str,
        #[source]
        source: ValidationError,
    },

    /// The underlying storage failed.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: &EntityId) -> Self {
        Self::NotFound {
            entity,
            id: id.clone(),
        }
    }

    pub fn already_exists(entity: &'static str, id: &EntityId) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.clone(),
        }
    }

    /// Wraps a storage-specific error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }

    /// Returns true if this is a [`RepositoryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Persistence contract for an entity type.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Repository<T: Send + Sync>: Send + Sync {
    /// Stores a new entity. Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, entity: &T) -> Result<()>;

    /// Overwrites a stored entity. Fails with `NotFound` if it isn't stored.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Loads an entity by id. Fails with `NotFound` if it isn't stored.
    async fn find(&self, id: &EntityId) -> Result<T>;

    /// Loads every stored entity.
    async fn find_all(&self) -> Result<Vec<T>>;
}

/// Repository for customers.
pub trait CustomerRepository: Repository<Customer> {}

/// Repository for products.
pub trait ProductRepository: Repository<Product> {}

/// Repository for orders.
pub trait OrderRepository: Repository<Order> {}

// Blanket implementations for all matching Repository implementations
impl<T: Repository<Customer> + ?Sized> CustomerRepository for T {}
impl<T: Repository<Product> + ?Sized> ProductRepository for T {}
impl<T: Repository<Order> + ?Sized> OrderRepository for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;

    #[test]
    fn test_not_found_message() {
        let err = RepositoryError::not_found("Order", &EntityId::new("456ABC"));
        assert_eq!(err.to_string(), "Order not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_corrupted_keeps_source() {
        let err = RepositoryError::Corrupted {
            entity: "Order",
            source: ValidationError::new("Order", Field::Items, "Items are required"),
        };
        assert_eq!(err.to_string(), "Stored Order is invalid: Items are required");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_storage_wraps_error() {
        let err = RepositoryError::storage(std::io::Error::other("connection reset"));
        assert_eq!(err.to_string(), "Storage error: connection reset");
        assert!(!err.is_not_found());
    }
}
