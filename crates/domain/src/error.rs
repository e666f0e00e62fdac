//! Domain error types.

use events::DispatchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::RepositoryError;

/// The field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Id,
    Name,
    CustomerId,
    Items,
    Quantity,
    Address,
    Price,
    Street,
    Zip,
    City,
}

/// An entity or value object rejected its input.
///
/// The display text is the human-readable message alone (for example
/// `"Id is required"`); match on [`entity`](Self::entity) and
/// [`field`](Self::field) rather than on the text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The entity or value object that failed validation.
    pub entity: &'static str,

    /// The offending field.
    pub field: Field,

    /// Human-readable message.
    pub message: &'static str,
}

impl ValidationError {
    pub(crate) const fn new(entity: &'static str, field: Field, message: &'static str) -> Self {
        Self {
            entity,
            field,
            message,
        }
    }
}

/// Errors that can occur in domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An entity rejected the requested change.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The repository failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// One or more event handlers failed after the change was persisted.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message_only() {
        let err = ValidationError::new("Customer", Field::Id, "Id is required");
        assert_eq!(err.to_string(), "Id is required");
        assert_eq!(err.field, Field::Id);
    }

    #[test]
    fn domain_error_wraps_validation() {
        let err: DomainError =
            ValidationError::new("Order", Field::Items, "Items are required").into();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Items are required");
    }
}
