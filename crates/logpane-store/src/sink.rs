use logpane_types::LogRecord;

use crate::store::{LogStore, UNBOUNDED};

/// A destination that consumes finished, formatted log records.
///
/// Implemented by sinks handed to a logging framework; the framework only
/// ever calls `write` with fully constructed records.
pub trait Destination: Send + Sync {
    /// Accept one record.
    fn write(&self, record: LogRecord);

    /// Whether the destination can currently accept records.
    fn is_valid(&self) -> bool;

    /// Fixed identifier for this kind of destination.
    fn kind(&self) -> &'static str;
}

/// The live log-window destination: every written record lands in a
/// bounded [`LogStore`] that a viewer observes.
#[derive(Clone)]
pub struct WindowDestination {
    store: LogStore,
}

impl WindowDestination {
    pub const KIND: &'static str = "window";

    /// Create a destination keeping at most `max_records` records.
    pub fn new(max_records: usize) -> Self {
        Self {
            store: LogStore::new(max_records),
        }
    }

    /// Create a destination that never evicts.
    pub fn unbounded() -> Self {
        Self::new(UNBOUNDED)
    }

    /// The backing store, for viewers and filter views.
    pub fn store(&self) -> &LogStore {
        &self.store
    }
}

impl Destination for WindowDestination {
    fn write(&self, record: LogRecord) {
        self.store.append(record);
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        Self::KIND
    }
}
