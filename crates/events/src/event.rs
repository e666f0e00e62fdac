//! Core event trait.

use std::fmt::Debug;
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// An immutable fact published through an [`EventDispatcher`].
///
/// Implementors are usually a tagged union of every event in a domain. The
/// associated [`Kind`](Event::Kind) is the fieldless discriminant used to key
/// handler lists, so subscriptions are checked by the compiler rather than
/// matched on free-form strings.
///
/// [`EventDispatcher`]: crate::EventDispatcher
pub trait Event: Debug + Send + Sync + 'static {
    /// Discriminant identifying which handlers receive the event.
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the kind of this event.
    fn kind(&self) -> Self::Kind;

    /// Returns the event name, used for logging and metrics labels.
    ///
    /// Implementors typically return the static name of [`Self::kind`].
    fn name(&self) -> &'static str;

    /// Returns when the event was created.
    fn occurred_on(&self) -> DateTime<Utc>;
}
