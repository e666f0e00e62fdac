use common::EntityId;

use crate::error::ValidationError;

use super::{Address, Customer};

/// Builds customers with freshly generated identifiers.
pub struct CustomerFactory;

impl CustomerFactory {
    pub fn create(name: impl Into<String>) -> Result<Customer, ValidationError> {
        Customer::new(EntityId::generate(), name)
    }

    pub fn create_with_address(
        name: impl Into<String>,
        address: Address,
    ) -> Result<Customer, ValidationError> {
        let mut customer = Self::create(name)?;
        customer.change_address(address);
        Ok(customer)
    }
}
