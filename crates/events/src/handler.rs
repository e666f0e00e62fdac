//! Event handler trait.

use crate::{Event, HandlerError};

/// A synchronous subscriber to events of type `E`.
///
/// Handlers are registered with an [`EventDispatcher`](crate::EventDispatcher)
/// for one or more event kinds. A handler registered for several kinds, or
/// one that receives a variant it does not care about, should simply return
/// `Ok(())` for it.
pub trait EventHandler<E: Event>: Send + Sync {
    /// Returns a name identifying this handler in logs and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Handles a single event.
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}

/// Adapts a closure into an [`EventHandler`].
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> FnHandler<F> {
    /// Wraps `f` under the given handler name.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> std::fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

impl<E, F> EventHandler<E> for FnHandler<F>
where
    E: Event,
    F: Fn(&E) -> Result<(), HandlerError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        (self.f)(event)
    }
}
