use thiserror::Error;

/// Errors surfaced to callers of the store and filter APIs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A source or visible index beyond the current bounds was accessed.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A raw severity value outside the defined level set was supplied.
    #[error("invalid severity threshold {value}")]
    InvalidThreshold { value: u8 },
}

/// Failure reported by an observer callback during dispatch.
///
/// Observer failures never unwind store state; they are logged and the
/// remaining observers still run.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;
