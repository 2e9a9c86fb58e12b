//! # relay-out
//!
//! Relay IRC channel traffic to an MQTT broker.
//!
//! relay-out watches one channel for messages and `/me` actions and
//! publishes each as a display line (`<nick> text` or `* nick text`) to a
//! broker topic, but only while no local client is attached to the host.
//!
//! ## Features
//!
//! - **Argument validation**: a single `--flag=value` string configures the relay
//! - **Attachment gating**: nothing is relayed while someone is watching locally
//! - **MQTT publishing**: single-shot, non-retained delivery at QoS 0, 1 or 2
//! - **Host adapter**: the callback surface chat-server hosts drive

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod args;
pub mod cli;
pub mod core;
pub mod error;
pub mod publish;
pub mod relay;

// Re-export commonly used types at crate root
pub use error::{ArgError, Error, PublishError, RelayError, Result};

// Re-export core domain types
pub use core::{ChatEvent, EventKind, RelayConfig, format_event};

// Re-export argument validation
pub use args::{REQUIRED_KEYS, validate};

// Re-export publishing types
pub use publish::{DryRunPublisher, MqttPublisher, PublishRequest, Publisher, PublisherOptions};

// Re-export relay types
pub use relay::{
    AttachmentSource, HostAction, HostModule, Relay, RelayModule, RelayOutcome, RelayStats,
    RelayStatus, should_relay,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
