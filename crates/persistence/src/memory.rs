use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use domain::repository::Result;
use domain::{Customer, Order, Product, Repository, RepositoryError};
use tokio::sync::RwLock;

use crate::record_operation;

/// An entity that can be kept in an [`InMemoryRepository`].
pub trait StoredEntity: Clone + Send + Sync + 'static {
    /// Entity name used in errors and metrics.
    const NAME: &'static str;

    fn entity_id(&self) -> &EntityId;
}

impl StoredEntity for Customer {
    const NAME: &'static str = "Customer";

    fn entity_id(&self) -> &EntityId {
        self.id()
    }
}

impl StoredEntity for Product {
    const NAME: &'static str = "Product";

    fn entity_id(&self) -> &EntityId {
        self.id()
    }
}

impl StoredEntity for Order {
    const NAME: &'static str = "Order";

    fn entity_id(&self) -> &EntityId {
        self.id()
    }
}

/// In-memory repository implementation for testing.
///
/// Entities are kept in insertion order; `find_all` returns them in the order
/// they were created. Clones share the same storage.
#[derive(Clone)]
pub struct InMemoryRepository<T: StoredEntity> {
    entities: Arc<RwLock<Vec<T>>>,
}

pub type InMemoryCustomerRepository = InMemoryRepository<Customer>;
pub type InMemoryProductRepository = InMemoryRepository<Product>;
pub type InMemoryOrderRepository = InMemoryRepository<Order>;

impl<T: StoredEntity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            entities: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: StoredEntity> InMemoryRepository<T> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Removes every stored entity.
    pub async fn clear(&self) {
        self.entities.write().await.clear();
    }
}

#[async_trait]
impl<T: StoredEntity> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> Result<()> {
        let mut store = self.entities.write().await;
        let id = entity.entity_id();
        if store.iter().any(|e| e.entity_id() == id) {
            return Err(RepositoryError::already_exists(T::NAME, id));
        }

        store.push(entity.clone());
        record_operation(T::NAME, "create");
        tracing::debug!(entity = T::NAME, %id, "created");
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<()> {
        let mut store = self.entities.write().await;
        let id = entity.entity_id();
        let slot = store
            .iter_mut()
            .find(|e| e.entity_id() == id)
            .ok_or_else(|| RepositoryError::not_found(T::NAME, id))?;

        *slot = entity.clone();
        record_operation(T::NAME, "update");
        tracing::debug!(entity = T::NAME, %id, "updated");
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<T> {
        record_operation(T::NAME, "find");
        let store = self.entities.read().await;
        store
            .iter()
            .find(|e| e.entity_id() == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(T::NAME, id))
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        record_operation(T::NAME, "find_all");
        Ok(self.entities.read().await.clone())
    }
}
