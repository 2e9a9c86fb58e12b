//! Core domain models for relay-out.
//!
//! Chat events, their display formatting, and the typed relay
//! configuration. These are pure types with no I/O dependencies.

pub mod config;
pub mod event;

pub use config::{MAX_QOS, RelayConfig};
pub use event::{ChatEvent, EventKind, format_event};
