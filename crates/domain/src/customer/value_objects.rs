//! Value objects for the customer domain.

use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};

const ENTITY: &str = "Address";

/// A postal address. Immutable once constructed; replace it to change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressRecord")]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

#[derive(Deserialize)]
struct AddressRecord {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl TryFrom<AddressRecord> for Address {
    type Error = ValidationError;

    fn try_from(record: AddressRecord) -> Result<Self, Self::Error> {
        Self::new(record.street, record.number, record.zip, record.city)
    }
}

impl Address {
    /// Creates an address, rejecting a blank street, zip or city.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.street.trim().is_empty() {
            return Err(ValidationError::new(ENTITY, Field::Street, "Street is required"));
        }
        if self.zip.trim().is_empty() {
            return Err(ValidationError::new(ENTITY, Field::Zip, "Zip is required"));
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::new(ENTITY, Field::City, "City is required"));
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}
