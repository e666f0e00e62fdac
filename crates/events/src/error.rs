//! Dispatcher error types.

use thiserror::Error;

/// Error returned by an [`EventHandler`](crate::EventHandler).
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler rejected or could not process the event.
    #[error("{0}")]
    Failed(String),

    /// An underlying error raised while handling the event.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates a handler error from a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A single handler failure recorded during dispatch.
#[derive(Debug)]
pub struct HandlerFailure {
    /// Name of the handler that failed.
    pub handler: &'static str,

    /// The error it returned.
    pub error: HandlerError,
}

/// Error returned by [`EventDispatcher::notify`](crate::EventDispatcher::notify)
/// when one or more handlers failed.
///
/// Every registered handler still runs; this error only reports the ones that
/// did not succeed.
#[derive(Debug)]
pub struct DispatchError {
    /// Name of the event being dispatched.
    pub event: &'static str,

    /// Number of handlers invoked.
    pub invoked: usize,

    /// Handlers that returned an error, in invocation order.
    pub failures: Vec<HandlerFailure>,
}

impl DispatchError {
    /// Returns the names of the failing handlers.
    pub fn failed_handlers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.failures.iter().map(|f| f.handler)
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} handler(s) failed for event {}",
            self.failures.len(),
            self.invoked,
            self.event
        )?;
        for failure in &self.failures {
            write!(f, "; {}: {}", failure.handler, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|f| &f.error as &(dyn std::error::Error + 'static))
    }
}
