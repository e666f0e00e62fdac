//! Handlers reacting to customer events.

use events::{EventHandler, HandlerError};

use crate::event::DomainEvent;

/// First subscriber to CustomerCreated: logs the new customer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCustomerCreatedHandler;

impl EventHandler<DomainEvent> for LogCustomerCreatedHandler {
    fn name(&self) -> &'static str {
        "log_customer_created"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        if let DomainEvent::CustomerCreated(data) = event {
            tracing::info!(
                customer_id = %data.customer_id,
                "This is the first log of the CustomerCreated event"
            );
        }
        Ok(())
    }
}

/// Second subscriber to CustomerCreated.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnounceCustomerCreatedHandler;

impl EventHandler<DomainEvent> for AnnounceCustomerCreatedHandler {
    fn name(&self) -> &'static str {
        "announce_customer_created"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        if let DomainEvent::CustomerCreated(data) = event {
            tracing::info!(
                customer_id = %data.customer_id,
                name = %data.name,
                "This is the second log of the CustomerCreated event"
            );
        }
        Ok(())
    }
}

/// Logs every customer address change.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAddressChangedHandler;

impl LogAddressChangedHandler {
    /// Renders the log line for an address change.
    pub fn message(event: &DomainEvent) -> Option<String> {
        match event {
            DomainEvent::CustomerAddressChanged(data) => Some(format!(
                "Customer address: {}, {} changed to: {}",
                data.customer_id, data.name, data.address
            )),
            _ => None,
        }
    }
}

impl EventHandler<DomainEvent> for LogAddressChangedHandler {
    fn name(&self) -> &'static str {
        "log_address_changed"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        if let Some(message) = Self::message(event) {
            tracing::info!("{message}");
        }
        Ok(())
    }
}
