use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use events::{Event, EventDispatcher, EventHandler, FnHandler, HandlerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BenchKind {
    Ping,
}

#[derive(Debug)]
struct Ping {
    occurred_on: DateTime<Utc>,
}

impl Event for Ping {
    type Kind = BenchKind;

    fn kind(&self) -> BenchKind {
        BenchKind::Ping
    }

    fn name(&self) -> &'static str {
        "Ping"
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }
}

fn dispatcher_with(handler_count: usize, counter: &Arc<AtomicU64>) -> EventDispatcher<Ping> {
    let mut dispatcher = EventDispatcher::new();
    for _ in 0..handler_count {
        let counter = Arc::clone(counter);
        let handler: Arc<dyn EventHandler<Ping>> = Arc::new(FnHandler::new(
            "counter",
            move |_: &Ping| -> Result<(), HandlerError> {
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(())
            },
        ));
        dispatcher.register(BenchKind::Ping, handler);
    }
    dispatcher
}

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatcher/notify");
    let event = Ping {
        occurred_on: Utc::now(),
    };

    for handler_count in [1usize, 10, 100] {
        let counter = Arc::new(AtomicU64::new(0));
        let dispatcher = dispatcher_with(handler_count, &counter);

        group.bench_with_input(
            BenchmarkId::from_parameter(handler_count),
            &handler_count,
            |b, _| {
                b.iter(|| dispatcher.notify(&event).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_register_unregister(c: &mut Criterion) {
    c.bench_function("dispatcher/register_unregister", |b| {
        let counter = Arc::new(AtomicU64::new(0));
        b.iter(|| {
            let mut dispatcher = dispatcher_with(10, &counter);
            let extra: Arc<dyn EventHandler<Ping>> = Arc::new(FnHandler::new(
                "extra",
                |_: &Ping| -> Result<(), HandlerError> { Ok(()) },
            ));
            dispatcher.register(BenchKind::Ping, Arc::clone(&extra));
            dispatcher.unregister(BenchKind::Ping, &extra);
        });
    });
}

criterion_group!(benches, bench_notify, bench_register_unregister);
criterion_main!(benches);
