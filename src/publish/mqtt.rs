//! MQTT publisher backed by `rumqttc`.
//!
//! Each call opens a fresh connection, publishes once, waits for the
//! acknowledgement the QoS level calls for, then disconnects. Nothing is
//! kept between calls.

use super::traits::{PublishRequest, Publisher};
use super::{DEFAULT_KEEP_ALIVE_SECS, DEFAULT_TIMEOUT_SECS};
use crate::error::PublishError;
use rumqttc::{Client, Event, MqttOptions, Outgoing, Packet, QoS};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Request queue size between the client handle and its connection.
const CHANNEL_CAPACITY: usize = 10;

/// Connection tuning for [`MqttPublisher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublisherOptions {
    /// Upper bound for one connect/publish/disconnect exchange.
    pub timeout: Duration,

    /// MQTT keep-alive interval.
    pub keep_alive: Duration,
}

impl Default for PublisherOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
        }
    }
}

impl PublisherOptions {
    /// Creates options from whole seconds.
    #[must_use]
    pub const fn from_secs(timeout: u64, keep_alive: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout),
            keep_alive: Duration::from_secs(keep_alive),
        }
    }
}

/// Event that marks a publish as delivered for a given QoS level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    /// QoS 0: the publish packet left the client.
    Sent,
    /// QoS 1: the broker answered with `PUBACK`.
    Acknowledged,
    /// QoS 2: the broker answered with `PUBCOMP`.
    Completed,
}

impl Completion {
    fn for_qos(qos: QoS) -> Self {
        match qos {
            QoS::AtMostOnce => Self::Sent,
            QoS::AtLeastOnce => Self::Acknowledged,
            QoS::ExactlyOnce => Self::Completed,
        }
    }

    fn is_reached_by(self, event: &Event) -> bool {
        matches!(
            (self, event),
            (Self::Sent, Event::Outgoing(Outgoing::Publish(_)))
                | (Self::Acknowledged, Event::Incoming(Packet::PubAck(_)))
                | (Self::Completed, Event::Incoming(Packet::PubComp(_)))
        )
    }
}

/// Maps a numeric QoS level to the client's enum.
fn qos_level(qos: u8) -> Result<QoS, PublishError> {
    match qos {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(PublishError::Rejected(format!("unsupported QoS level {other}"))),
    }
}

/// Single-shot MQTT publisher.
///
/// # Examples
///
/// ```no_run
/// use relay_out::publish::{MqttPublisher, PublishRequest, Publisher, PublisherOptions};
///
/// let mut publisher = MqttPublisher::new(PublisherOptions::default());
/// let request = PublishRequest {
///     topic: "irc/out".to_string(),
///     host: "localhost".to_string(),
///     port: 1883,
///     payload: "<nick> hello".to_string(),
///     qos: 1,
///     client_id: "relay".to_string(),
///     retain: false,
/// };
/// publisher.publish(&request).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct MqttPublisher {
    options: PublisherOptions,
}

impl MqttPublisher {
    /// Creates a publisher with the given connection options.
    #[must_use]
    pub const fn new(options: PublisherOptions) -> Self {
        Self { options }
    }

    /// Returns the connection options.
    #[must_use]
    pub const fn options(&self) -> &PublisherOptions {
        &self.options
    }

    fn timeout_error(&self, request: &PublishRequest) -> PublishError {
        PublishError::Timeout {
            host: request.host.clone(),
            port: request.port,
            seconds: self.options.timeout.as_secs(),
        }
    }
}

impl Publisher for MqttPublisher {
    fn publish(&mut self, request: &PublishRequest) -> Result<(), PublishError> {
        let qos = qos_level(request.qos)?;
        if request.client_id.trim().is_empty() || request.client_id.starts_with(' ') {
            return Err(PublishError::Rejected(format!(
                "invalid client id {:?}",
                request.client_id
            )));
        }

        let mut options = MqttOptions::new(&request.client_id, &request.host, request.port);
        options.set_keep_alive(self.options.keep_alive);
        options.set_clean_session(true);

        let (client, mut connection) = Client::new(options, CHANNEL_CAPACITY);
        client.publish(
            &request.topic,
            qos,
            request.retain,
            request.payload.as_bytes().to_vec(),
        )?;

        let completion = Completion::for_qos(qos);
        let deadline = Instant::now() + self.options.timeout;
        let mut delivered = false;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(self.timeout_error(request));
            }

            match connection.recv_timeout(remaining) {
                Err(_) => return Err(self.timeout_error(request)),
                Ok(Err(err)) if delivered => {
                    debug!(error = %err, "connection closed after delivery");
                    return Ok(());
                }
                Ok(Err(err)) => {
                    return Err(PublishError::Connection {
                        host: request.host.clone(),
                        port: request.port,
                        reason: err.to_string(),
                    });
                }
                Ok(Ok(event)) => {
                    if delivered {
                        if matches!(event, Event::Outgoing(Outgoing::Disconnect)) {
                            return Ok(());
                        }
                    } else if completion.is_reached_by(&event) {
                        delivered = true;
                        info!(
                            topic = %request.topic,
                            host = %request.host,
                            port = request.port,
                            qos = request.qos,
                            "published message"
                        );
                        client.disconnect()?;
                    }
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "mqtt"
    }
}
