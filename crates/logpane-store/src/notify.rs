use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ObserverError;

/// Change notification emitted after a mutation has committed.
///
/// Delivery is synchronous and in registration order, strictly after the
/// mutation is visible to reads, so a callback may immediately query the
/// store and see the post-mutation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A record was appended at the given source index.
    Inserted { index: usize },
    /// The oldest `count` records were removed; surviving indices shift
    /// down by `count`.
    Evicted { count: usize },
    /// The store was emptied.
    Reset,
    /// A filter view's threshold changed; consumers of the filtered
    /// projection should treat this as a full reset.
    ThresholdChanged,
}

/// A consumer of change notifications.
pub trait Observer: Send + Sync {
    fn on_event(&self, event: StoreEvent) -> Result<(), ObserverError>;
}

/// Blanket impl so plain closures can subscribe.
impl<F> Observer for F
where
    F: Fn(StoreEvent) -> Result<(), ObserverError> + Send + Sync,
{
    fn on_event(&self, event: StoreEvent) -> Result<(), ObserverError> {
        self(event)
    }
}

/// Registry of observers with ordered, failure-isolated dispatch.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Arc<RwLock<Vec<Arc<dyn Observer>>>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) {
        self.inner.write().push(observer);
    }

    /// Deliver an event to every registered observer.
    ///
    /// A failing observer is logged and skipped; it never blocks delivery
    /// to observers registered after it.
    pub fn emit(&self, event: StoreEvent) {
        // Snapshot the list so a callback may subscribe without deadlocking.
        let observers: Vec<_> = self.inner.read().iter().cloned().collect();
        for (slot, observer) in observers.iter().enumerate() {
            if let Err(err) = observer.on_event(event) {
                tracing::warn!(?event, slot, %err, "log observer failed");
            }
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
