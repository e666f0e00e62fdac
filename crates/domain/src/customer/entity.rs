//! Customer entity.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};

use super::Address;

const ENTITY: &str = "Customer";

/// A customer.
///
/// A customer starts inactive, without an address and with zero reward
/// points. It can only be activated once an address has been set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    id: EntityId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

/// Wire shape of a [`Customer`]; deserialization goes through
/// [`Customer::restore`].
#[derive(Deserialize)]
struct CustomerRecord {
    id: EntityId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = ValidationError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        Self::restore(
            record.id,
            record.name,
            record.address,
            record.active,
            record.reward_points,
        )
    }
}

impl Customer {
    /// Creates a new inactive customer.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Rebuilds a customer from stored state, re-checking every invariant.
    pub fn restore(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: u64,
    ) -> Result<Self, ValidationError> {
        let mut customer = Self::new(id, name)?;
        customer.address = address;
        customer.reward_points = reward_points;
        if active {
            customer.activate()?;
        }
        Ok(customer)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_blank() {
            return Err(ValidationError::new(ENTITY, Field::Id, "Id is required"));
        }
        Self::validate_name(&self.name)
    }

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new(ENTITY, Field::Name, "Name is required"));
        }
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Renames the customer. The new name must not be blank.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        Self::validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the customer's address.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activates the customer. Fails if no address has been set.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        if self.address.is_none() {
            return Err(ValidationError::new(
                ENTITY,
                Field::Address,
                "Address is mandatory to activate a customer",
            ));
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds reward points, saturating at `u64::MAX`.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}
