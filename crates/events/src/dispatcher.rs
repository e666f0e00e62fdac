//! Event dispatcher: registry of handlers keyed by event kind.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{DispatchError, Event, EventHandler, HandlerFailure};

/// Registry mapping event kinds to ordered handler lists.
///
/// The dispatcher is an ordinary value: build it, register handlers with
/// `&mut` access, then share it (typically behind an `Arc`) with the code that
/// publishes events. Dispatch is synchronous and runs on the caller's thread.
///
/// Handler lists keep insertion order and do not deduplicate: registering the
/// same handler twice makes it run twice.
pub struct EventDispatcher<E: Event> {
    handlers: HashMap<E::Kind, Vec<Arc<dyn EventHandler<E>>>>,
}

impl<E: Event> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<E: Event> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, handlers) in &self.handlers {
            let names: Vec<_> = handlers.iter().map(|h| h.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}

impl<E: Event> EventDispatcher<E> {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to the list for `kind`, creating the list if needed.
    pub fn register(&mut self, kind: E::Kind, handler: Arc<dyn EventHandler<E>>) {
        tracing::debug!(?kind, handler = handler.name(), "registering event handler");
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Removes `handler` from the list for `kind`.
    ///
    /// Handlers are matched by identity (the same `Arc` allocation), not by
    /// type. Only the first matching registration is removed. Returns false
    /// if the handler was not registered for `kind`.
    pub fn unregister<H>(&mut self, kind: E::Kind, handler: &Arc<H>) -> bool
    where
        H: EventHandler<E> + ?Sized,
    {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };

        let target = Arc::as_ptr(handler);
        match list
            .iter()
            .position(|h| std::ptr::addr_eq(Arc::as_ptr(h), target))
        {
            Some(index) => {
                let removed = list.remove(index);
                tracing::debug!(?kind, handler = removed.name(), "unregistered event handler");
                true
            }
            None => false,
        }
    }

    /// Removes every handler for every kind.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered for `kind`, in registration order.
    pub fn handlers(&self, kind: E::Kind) -> &[Arc<dyn EventHandler<E>>] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: E::Kind) -> usize {
        self.handlers(kind).len()
    }

    /// Returns true if no handler is registered for any kind.
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Delivers `event` to every handler registered for its kind.
    ///
    /// Handlers run synchronously in registration order. A failing handler
    /// does not stop the ones after it; all failures are collected into the
    /// returned [`DispatchError`]. On success, returns the number of handlers
    /// invoked.
    #[tracing::instrument(skip(self, event), fields(event = event.name()))]
    pub fn notify(&self, event: &E) -> Result<usize, DispatchError> {
        let handlers = self.handlers(event.kind());
        if handlers.is_empty() {
            tracing::debug!("no handlers registered");
            return Ok(0);
        }

        let mut failures = Vec::new();
        for handler in handlers {
            if let Err(error) = handler.handle(event) {
                tracing::warn!(handler = handler.name(), %error, "event handler failed");
                metrics::counter!("event_handler_failures_total", "event" => event.name())
                    .increment(1);
                failures.push(HandlerFailure {
                    handler: handler.name(),
                    error,
                });
            }
        }

        metrics::counter!("events_dispatched_total", "event" => event.name()).increment(1);

        if failures.is_empty() {
            Ok(handlers.len())
        } else {
            Err(DispatchError {
                event: event.name(),
                invoked: handlers.len(),
                failures,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{FnHandler, HandlerError};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Created,
        Renamed,
    }

    #[derive(Debug)]
    struct TestEvent {
        kind: Kind,
        occurred_on: DateTime<Utc>,
    }

    impl TestEvent {
        fn new(kind: Kind) -> Self {
            Self {
                kind,
                occurred_on: Utc::now(),
            }
        }
    }

    impl Event for TestEvent {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            self.kind
        }

        fn name(&self) -> &'static str {
            match self.kind {
                Kind::Created => "Created",
                Kind::Renamed => "Renamed",
            }
        }

        fn occurred_on(&self) -> DateTime<Utc> {
            self.occurred_on
        }
    }

    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EventHandler<TestEvent> for CountingHandler {
        fn handle(&self, _event: &TestEvent) -> Result<(), HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn recorder(
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn EventHandler<TestEvent>> {
        let log = Arc::clone(log);
        Arc::new(FnHandler::new(name, move |_: &TestEvent| -> Result<(), HandlerError> {
            log.lock().unwrap().push(name);
            Ok(())
        }))
    }

    #[test]
    fn registered_handler_is_invoked_once() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        let handler = Arc::new(CountingHandler::default());
        dispatcher.register(Kind::Created, handler.clone());

        let invoked = dispatcher.notify(&TestEvent::new(Kind::Created)).unwrap();

        assert_eq!(invoked, 1);
        assert_eq!(handler.calls(), 1);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        dispatcher.register(Kind::Created, recorder("first", &log));
        dispatcher.register(Kind::Created, recorder("second", &log));

        let names: Vec<_> = dispatcher
            .handlers(Kind::Created)
            .iter()
            .map(|h| h.name())
            .collect();
        assert_eq!(names, vec!["first", "second"]);

        dispatcher.notify(&TestEvent::new(Kind::Created)).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn only_handlers_for_the_event_kind_run() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        let created = Arc::new(CountingHandler::default());
        let renamed = Arc::new(CountingHandler::default());
        dispatcher.register(Kind::Created, created.clone());
        dispatcher.register(Kind::Renamed, renamed.clone());

        dispatcher.notify(&TestEvent::new(Kind::Renamed)).unwrap();

        assert_eq!(created.calls(), 0);
        assert_eq!(renamed.calls(), 1);
    }

    #[test]
    fn notify_without_handlers_is_a_no_op() {
        let dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        assert_eq!(dispatcher.notify(&TestEvent::new(Kind::Created)).unwrap(), 0);
    }

    #[test]
    fn duplicate_registrations_are_kept() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        let handler = Arc::new(CountingHandler::default());
        dispatcher.register(Kind::Created, handler.clone());
        dispatcher.register(Kind::Created, handler.clone());

        assert_eq!(dispatcher.handler_count(Kind::Created), 2);
        dispatcher.notify(&TestEvent::new(Kind::Created)).unwrap();
        assert_eq!(handler.calls(), 2);
    }

    #[test]
    fn unregister_removes_only_that_instance() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        let first = Arc::new(CountingHandler::default());
        let second = Arc::new(CountingHandler::default());
        dispatcher.register(Kind::Created, first.clone());
        dispatcher.register(Kind::Created, second.clone());

        assert!(dispatcher.unregister(Kind::Created, &first));
        assert_eq!(dispatcher.handler_count(Kind::Created), 1);

        dispatcher.notify(&TestEvent::new(Kind::Created)).unwrap();
        assert_eq!(first.calls(), 0);
        assert_eq!(second.calls(), 1);
    }

    #[test]
    fn unregister_unknown_handler_is_a_no_op() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        let registered = Arc::new(CountingHandler::default());
        let stranger = Arc::new(CountingHandler::default());
        dispatcher.register(Kind::Created, registered.clone());

        assert!(!dispatcher.unregister(Kind::Created, &stranger));
        assert!(!dispatcher.unregister(Kind::Renamed, &registered));
        assert_eq!(dispatcher.handler_count(Kind::Created), 1);
    }

    #[test]
    fn unregister_all_clears_registry() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        dispatcher.register(Kind::Created, Arc::new(CountingHandler::default()));
        dispatcher.register(Kind::Renamed, Arc::new(CountingHandler::default()));

        dispatcher.unregister_all();

        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.handler_count(Kind::Created), 0);
        assert_eq!(dispatcher.handler_count(Kind::Renamed), 0);
    }

    #[test]
    fn failing_handler_does_not_stop_dispatch() {
        let mut dispatcher: EventDispatcher<TestEvent> = EventDispatcher::new();
        let before = Arc::new(CountingHandler::default());
        let after = Arc::new(CountingHandler::default());
        dispatcher.register(Kind::Created, before.clone());
        dispatcher.register(
            Kind::Created,
            Arc::new(FnHandler::new("broken", |_: &TestEvent| -> Result<(), HandlerError> {
                Err(HandlerError::failed("boom"))
            })),
        );
        dispatcher.register(Kind::Created, after.clone());

        let err = dispatcher
            .notify(&TestEvent::new(Kind::Created))
            .unwrap_err();

        assert_eq!(err.event, "Created");
        assert_eq!(err.invoked, 3);
        assert_eq!(err.failed_handlers().collect::<Vec<_>>(), vec!["broken"]);
        assert_eq!(before.calls(), 1);
        assert_eq!(after.calls(), 1);
    }
}
