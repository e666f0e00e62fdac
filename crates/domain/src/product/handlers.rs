use events::{EventHandler, HandlerError};

use crate::event::DomainEvent;

/// Announces new products by email.
///
/// Delivery is not wired to a mail transport; the handler records the
/// notification in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct SendEmailOnProductCreatedHandler;

impl EventHandler<DomainEvent> for SendEmailOnProductCreatedHandler {
    fn name(&self) -> &'static str {
        "send_email_on_product_created"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        if let DomainEvent::ProductCreated(data) = event {
            tracing::info!(
                product_id = %data.product_id,
                name = %data.name,
                price = %data.price,
                "Sending email announcing new product"
            );
        }
        Ok(())
    }
}
