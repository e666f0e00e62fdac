//! Customer service tying the repository and the event dispatcher together.

use std::sync::Arc;

use common::EntityId;
use events::EventDispatcher;

use crate::error::DomainError;
use crate::event::DomainEvent;
use crate::repository::CustomerRepository;

use super::{Address, Customer};

/// Service for managing customers.
///
/// Every change is persisted before its event is published. If a handler
/// fails, the change stays persisted and the dispatch failure is returned.
pub struct CustomerService<R: CustomerRepository> {
    repository: R,
    dispatcher: Arc<EventDispatcher<DomainEvent>>,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a new customer service.
    pub fn new(repository: R, dispatcher: Arc<EventDispatcher<DomainEvent>>) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Registers a new customer and publishes CustomerCreated.
    #[tracing::instrument(skip(self, name))]
    pub async fn register(
        &self,
        id: EntityId,
        name: impl Into<String> + Send,
    ) -> Result<Customer, DomainError> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;
        metrics::counter!("customers_registered_total").increment(1);

        self.dispatcher
            .notify(&DomainEvent::customer_created(&customer))?;
        Ok(customer)
    }

    /// Replaces a customer's address and publishes CustomerAddressChanged.
    #[tracing::instrument(skip(self))]
    pub async fn change_address(
        &self,
        id: &EntityId,
        address: Address,
    ) -> Result<Customer, DomainError> {
        let mut customer = self.repository.find(id).await?;
        customer.change_address(address.clone());
        self.repository.update(&customer).await?;

        self.dispatcher
            .notify(&DomainEvent::customer_address_changed(&customer, &address))?;
        Ok(customer)
    }

    /// Activates a customer.
    #[tracing::instrument(skip(self))]
    pub async fn activate(&self, id: &EntityId) -> Result<Customer, DomainError> {
        let mut customer = self.repository.find(id).await?;
        customer.activate()?;
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    /// Deactivates a customer.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate(&self, id: &EntityId) -> Result<Customer, DomainError> {
        let mut customer = self.repository.find(id).await?;
        customer.deactivate();
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    /// Loads a customer by ID.
    pub async fn get_customer(&self, id: &EntityId) -> Result<Customer, DomainError> {
        Ok(self.repository.find(id).await?)
    }
}
