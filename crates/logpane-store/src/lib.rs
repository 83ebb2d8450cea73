//! Core of the logpane live log-viewing sink
//!
//! This crate provides the bounded record store, its severity-filtered
//! projection, the change-notification protocol, and the sink contract
//! consumed by logging frameworks.

mod error;
mod filter;
mod notify;
mod parser;
mod sink;
mod store;

pub use error::{ObserverError, StoreError};
pub use filter::FilterView;
pub use notify::{Observer, Observers, StoreEvent};
pub use parser::LineParser;
pub use sink::{Destination, WindowDestination};
pub use store::{LogStore, UNBOUNDED};

// Re-export types used in our public API
pub use logpane_types::{LevelCounts, LogLevel, LogRecord};
