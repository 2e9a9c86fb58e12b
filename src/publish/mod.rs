//! Broker publishing for relay-out.
//!
//! The relay hands each formatted line to a [`Publisher`]. Two backends are
//! provided:
//!
//! - **MQTT**: single-shot delivery to a broker over `rumqttc`
//! - **Dry run**: logs what would have been published

pub mod dry_run;
pub mod mqtt;
pub mod traits;

pub use dry_run::DryRunPublisher;
pub use mqtt::{MqttPublisher, PublisherOptions};
pub use traits::{PublishRequest, Publisher};

/// Default time allowed for one connect/publish/disconnect exchange.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default MQTT keep-alive interval.
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 5;
