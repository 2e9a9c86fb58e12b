//! Publisher trait definition.

use crate::core::RelayConfig;
use crate::error::PublishError;
use serde::Serialize;

/// One message to deliver to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishRequest {
    /// Broker topic.
    pub topic: String,

    /// Broker hostname.
    pub host: String,

    /// Broker port.
    pub port: u16,

    /// Message body.
    pub payload: String,

    /// QoS level (0, 1 or 2).
    pub qos: u8,

    /// Client identity used for the connection.
    pub client_id: String,

    /// Broker retain flag. The relay always sends `false`.
    pub retain: bool,
}

impl PublishRequest {
    /// Builds a non-retained request for `payload` from the relay config.
    #[must_use]
    pub fn from_config(config: &RelayConfig, payload: impl Into<String>) -> Self {
        Self {
            topic: config.topic.clone(),
            host: config.host.clone(),
            port: config.port,
            payload: payload.into(),
            qos: config.qos,
            client_id: config.client_id.clone(),
            retain: false,
        }
    }
}

/// Trait for broker publishing backends.
///
/// A call either delivers the message or reports why it did not. Retrying
/// is left to the implementation's own configuration; callers never retry.
pub trait Publisher {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] on any connection or transport failure.
    fn publish(&mut self, request: &PublishRequest) -> Result<(), PublishError>;

    /// Returns the name of the backend.
    fn name(&self) -> &'static str;
}

impl<P: Publisher + ?Sized> Publisher for Box<P> {
    fn publish(&mut self, request: &PublishRequest) -> Result<(), PublishError> {
        (**self).publish(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
