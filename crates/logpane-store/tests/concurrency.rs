//! Multi-producer behavior of the store and its notifications.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use logpane_store::{LogLevel, LogRecord, LogStore, Observer, ObserverError, StoreEvent};

struct Recorder(Arc<Mutex<Vec<StoreEvent>>>);

impl Observer for Recorder {
    fn on_event(&self, event: StoreEvent) -> Result<(), ObserverError> {
        self.0.lock().push(event);
        Ok(())
    }
}

#[test]
fn concurrent_appends_lose_nothing() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 500;

    let store = LogStore::unbounded();
    let events = Arc::new(Mutex::new(Vec::new()));
    store.subscribe(Arc::new(Recorder(Arc::clone(&events))));

    thread::scope(|scope| {
        for producer in 0..PRODUCERS {
            let store = store.clone();
            scope.spawn(move || {
                for i in 0..PER_PRODUCER {
                    store.append(LogRecord::new(
                        LogLevel::Info,
                        format!("producer {producer} message {i}"),
                    ));
                }
            });
        }
    });

    // Every append committed exactly once.
    assert_eq!(store.len(), PRODUCERS * PER_PRODUCER);

    // One Inserted notification per commit, delivered in commit order:
    // with no evictions the reported tail indices are 0..n in sequence.
    let events = events.lock();
    assert_eq!(events.len(), PRODUCERS * PER_PRODUCER);
    for (expected, event) in events.iter().enumerate() {
        assert_eq!(*event, StoreEvent::Inserted { index: expected });
    }
}

#[test]
fn concurrent_appends_respect_capacity() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 300;
    const CAPACITY: usize = 64;

    let store = LogStore::new(CAPACITY);

    thread::scope(|scope| {
        for _ in 0..PRODUCERS {
            let store = store.clone();
            scope.spawn(move || {
                for i in 0..PER_PRODUCER {
                    store.append(LogRecord::new(LogLevel::Debug, format!("message {i}")));
                    assert!(store.len() <= CAPACITY);
                }
            });
        }
    });

    assert_eq!(store.len(), CAPACITY);
}

#[test]
fn readers_run_during_appends() {
    const APPENDS: usize = 2000;

    let store = LogStore::unbounded();
    let writer = store.clone();

    thread::scope(|scope| {
        scope.spawn(move || {
            for i in 0..APPENDS {
                writer.append(LogRecord::new(LogLevel::Info, format!("message {i}")));
            }
        });

        scope.spawn(|| {
            // Reads observe a prefix of the committed sequence.
            loop {
                let len = store.len();
                if len > 0 {
                    let record = store.get(len - 1).expect("committed index readable");
                    assert!(record.message.starts_with("message"));
                }
                if len == APPENDS {
                    break;
                }
                thread::yield_now();
            }
        });
    });
}
