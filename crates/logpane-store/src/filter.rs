use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use logpane_types::{LogLevel, LogRecord};

use crate::error::StoreError;
use crate::notify::{Observer, Observers, StoreEvent};
use crate::store::LogStore;

/// Severity-filtered projection over a [`LogStore`].
///
/// The view holds a handle to the store and a mutable threshold; a source
/// record is visible iff its level is at or above the threshold. Nothing
/// is materialized: every query re-evaluates against the store's current
/// state, so the view is always consistent with the latest committed
/// mutation.
#[derive(Clone)]
pub struct FilterView {
    /// Source store
    store: LogStore,

    /// Minimum visible level
    threshold: Arc<RwLock<LogLevel>>,

    /// Observers of this view (receive `ThresholdChanged`)
    observers: Observers,

    /// Serializes threshold change + notification spans
    commit: Arc<Mutex<()>>,
}

impl FilterView {
    /// Create a view over `store` with the given initial threshold.
    pub fn new(store: LogStore, threshold: LogLevel) -> Self {
        Self {
            store,
            threshold: Arc::new(RwLock::new(threshold)),
            observers: Observers::new(),
            commit: Arc::new(Mutex::new(())),
        }
    }

    /// Register an observer of this view.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) {
        self.observers.subscribe(observer);
    }

    /// The underlying store.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Current threshold.
    pub fn threshold(&self) -> LogLevel {
        *self.threshold.read()
    }

    /// Replace the threshold. Consumers of the projection treat the
    /// resulting `ThresholdChanged` as a full reset of the visible set.
    pub fn set_threshold(&self, level: LogLevel) {
        let _commit = self.commit.lock();
        *self.threshold.write() = level;
        self.observers.emit(StoreEvent::ThresholdChanged);
    }

    /// Replace the threshold from a raw severity ordinal, as produced by
    /// a selector widget. Values outside the defined level set are
    /// rejected, never clamped.
    pub fn set_threshold_index(&self, raw: u8) -> Result<(), StoreError> {
        let level =
            LogLevel::from_index(raw).ok_or(StoreError::InvalidThreshold { value: raw })?;
        self.set_threshold(level);
        Ok(())
    }

    /// Number of source records at or above the threshold.
    pub fn visible_count(&self) -> usize {
        let threshold = self.threshold();
        self.store
            .read()
            .iter()
            .filter(|r| r.level >= threshold)
            .count()
    }

    /// Map the `i`-th visible index (ascending) to its source index.
    pub fn map_visible_index_to_source(&self, i: usize) -> Result<usize, StoreError> {
        let threshold = self.threshold();
        let records = self.store.read();
        let mut matched = 0usize;
        for (source, record) in records.iter().enumerate() {
            if record.level >= threshold {
                if matched == i {
                    return Ok(source);
                }
                matched += 1;
            }
        }
        Err(StoreError::IndexOutOfRange {
            index: i,
            len: matched,
        })
    }

    /// All visible records, cloned in source order.
    pub fn visible_records(&self) -> Vec<LogRecord> {
        let threshold = self.threshold();
        self.store
            .read()
            .iter()
            .filter(|r| r.level >= threshold)
            .cloned()
            .collect()
    }

    /// Export every currently visible record, one pre-rendered line each.
    pub fn visible_text(&self) -> String {
        let threshold = self.threshold();
        let records = self.store.read();
        let lines: Vec<&str> = records
            .iter()
            .filter(|r| r.level >= threshold)
            .map(|r| r.formatted.as_str())
            .collect();
        lines.join("\n")
    }

    /// Export a selection of source indices; an empty selection exports
    /// everything currently visible.
    pub fn selection_text(&self, indices: &[usize]) -> Result<String, StoreError> {
        if indices.is_empty() {
            return Ok(self.visible_text());
        }
        self.store.extract_text(indices.iter().copied())
    }
}
