//! In-process event publishing for the checkout domain.
//!
//! This crate provides:
//! - [`Event`] trait for immutable, timestamped event payloads keyed by a kind
//! - [`EventHandler`] trait for synchronous subscribers
//! - [`EventDispatcher`], an explicit registry that fans events out to the
//!   handlers registered for their kind, in registration order

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;

pub use dispatcher::EventDispatcher;
pub use error::{DispatchError, HandlerError, HandlerFailure};
pub use event::Event;
pub use handler::{EventHandler, FnHandler};
