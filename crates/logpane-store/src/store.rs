use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use logpane_types::{LevelCounts, LogRecord};

use crate::error::StoreError;
use crate::notify::{Observer, Observers, StoreEvent};

/// Capacity sentinel for a store that never evicts.
pub const UNBOUNDED: usize = usize::MAX;

/// Thread-safe bounded store of log records.
///
/// Records live in arrival order; once `capacity` is exceeded the single
/// oldest record is evicted, so `len() <= capacity` holds after every
/// mutation. Cloning the store clones a handle to the same records.
///
/// Mutations serialize on a commit lock that is held across both the data
/// change and observer dispatch, which keeps notifications in exactly
/// commit order. The exclusive data lock itself is released before
/// dispatch, so observer callbacks may read back into the store.
#[derive(Clone)]
pub struct LogStore {
    /// Internal storage
    records: Arc<RwLock<VecDeque<LogRecord>>>,

    /// Maximum capacity, [`UNBOUNDED`] for no limit
    capacity: usize,

    /// Registered change observers
    observers: Observers,

    /// Serializes mutation + notification spans
    commit: Arc<Mutex<()>>,
}

impl LogStore {
    /// Create a new store with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            capacity,
            observers: Observers::new(),
            commit: Arc::new(Mutex::new(())),
        }
    }

    /// Create a store that never evicts.
    pub fn unbounded() -> Self {
        Self::new(UNBOUNDED)
    }

    /// Register a change observer.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) {
        self.observers.subscribe(observer);
    }

    /// Append a record at the tail, first evicting the oldest when at
    /// capacity. Emits `Evicted` (when eviction occurred) and then
    /// `Inserted` naming the committed tail index, so an observer can
    /// read back the inserted record at the index it was told.
    pub fn append(&self, record: LogRecord) {
        let _commit = self.commit.lock();

        let (inserted_at, evicted) = {
            let mut records = self.records.write();
            // Growth is one record at a time, so at most one eviction.
            let evicted = records.len() >= self.capacity && records.pop_front().is_some();
            records.push_back(record);
            (records.len() - 1, evicted)
        };

        if evicted {
            self.observers.emit(StoreEvent::Evicted { count: 1 });
        }
        self.observers.emit(StoreEvent::Inserted { index: inserted_at });
    }

    /// Empty the store. Clearing an already-empty store is a no-op and
    /// emits nothing.
    pub fn clear(&self) {
        let _commit = self.commit.lock();

        let was_empty = {
            let mut records = self.records.write();
            let was_empty = records.is_empty();
            records.clear();
            was_empty
        };

        if !was_empty {
            self.observers.emit(StoreEvent::Reset);
        }
    }

    /// Get a copy of the record at `index`.
    pub fn get(&self, index: usize) -> Result<LogRecord, StoreError> {
        let records = self.records.read();
        records
            .get(index)
            .cloned()
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: records.len(),
            })
    }

    /// Current record count.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Configured capacity, [`UNBOUNDED`] when no limit applies.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get all records (cloned for rendering).
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records.read().iter().cloned().collect()
    }

    /// Shared read access for in-crate projections.
    pub(crate) fn read(&self) -> parking_lot::RwLockReadGuard<'_, VecDeque<LogRecord>> {
        self.records.read()
    }

    /// Get record count per log level.
    pub fn level_counts(&self) -> LevelCounts {
        let records = self.records.read();
        let mut counts = LevelCounts::default();
        for record in records.iter() {
            counts.record(record.level);
        }
        counts
    }

    /// Bulk text extraction over a set of source indices.
    ///
    /// Duplicate indices collapse to one occurrence and output follows
    /// ascending source order regardless of input order. Any out-of-range
    /// index fails the whole extraction.
    pub fn extract_text(
        &self,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<String, StoreError> {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        let records = self.records.read();

        let mut lines = Vec::with_capacity(indices.len());
        for index in indices {
            let record = records.get(index).ok_or(StoreError::IndexOutOfRange {
                index,
                len: records.len(),
            })?;
            lines.push(record.formatted.as_str());
        }
        Ok(lines.join("\n"))
    }
}
