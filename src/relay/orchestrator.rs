//! Relay orchestrator.
//!
//! A [`Relay`] starts out unloaded. [`Relay::load`] validates the module
//! argument string exactly once: success makes the relay active, failure
//! leaves it in a terminal failed state for the rest of the session.
//!
//! While active, each event is filtered by channel, formatted, gated on
//! attachment and published. Publish outcomes never change the state.

use super::attachment::AttachmentSource;
use super::gate::should_relay;
use crate::core::{ChatEvent, EventKind, RelayConfig};
use crate::error::{ArgError, PublishError, RelayError};
use crate::publish::{PublishRequest, Publisher};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Lifecycle state of a relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayStatus {
    /// `load` has not run yet.
    Unloaded,
    /// Configuration validated; events are processed.
    Active,
    /// Configuration rejected; events are ignored for the session.
    LoadFailed,
}

impl fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unloaded => "unloaded",
            Self::Active => "active",
            Self::LoadFailed => "load_failed",
        })
    }
}

#[derive(Debug)]
enum State {
    Unloaded,
    Active(RelayConfig),
    LoadFailed(ArgError),
}

/// What happened to a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The formatted line was delivered.
    Published(String),
    /// Delivery was attempted and failed.
    PublishFailed(PublishError),
    /// A local client is attached; nothing was sent.
    SkippedAttached,
    /// The event was for another channel.
    IgnoredChannel,
    /// The relay is not active.
    NotActive,
}

/// Per-session event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    /// Events handed to the relay.
    pub received: u64,
    /// Events dropped because they were for another channel.
    pub ignored: u64,
    /// Events held back because a client was attached.
    pub skipped_attached: u64,
    /// Events delivered to the broker.
    pub published: u64,
    /// Events whose delivery failed.
    pub failed: u64,
}

/// The relay state machine.
///
/// # Examples
///
/// ```
/// use relay_out::publish::DryRunPublisher;
/// use relay_out::relay::{Relay, RelayOutcome, StaticAttachment};
///
/// let mut relay = Relay::new(DryRunPublisher::new(), StaticAttachment(false));
/// relay
///     .load(
///         "--topic=irc --host=localhost --port=1883 --qos=0 \
///          --client-id=relay --network-name=libera --channel=#rust",
///     )
///     .unwrap();
///
/// let outcome = relay.on_channel_message("nick", "#Rust", "hello");
/// assert_eq!(outcome, RelayOutcome::Published("<nick> hello".to_string()));
/// ```
#[derive(Debug)]
pub struct Relay<P, A> {
    state: State,
    publisher: P,
    attachment: A,
    stats: RelayStats,
}

impl<P: Publisher, A: AttachmentSource> Relay<P, A> {
    /// Creates an unloaded relay.
    pub const fn new(publisher: P, attachment: A) -> Self {
        Self {
            state: State::Unloaded,
            publisher,
            attachment,
            stats: RelayStats {
                received: 0,
                ignored: 0,
                skipped_attached: 0,
                published: 0,
                failed: 0,
            },
        }
    }

    /// Validates `raw` and activates the relay.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::AlreadyLoaded`] if `load` already ran, and
    /// [`RelayError::LoadFailed`] if validation fails. After a failure the
    /// relay never activates.
    pub fn load(&mut self, raw: &str) -> Result<(), RelayError> {
        if !matches!(self.state, State::Unloaded) {
            return Err(RelayError::AlreadyLoaded {
                state: self.status().to_string(),
            });
        }

        match RelayConfig::from_args(raw) {
            Ok(config) => {
                info!(
                    channel = %config.channel,
                    network = %config.network_name,
                    topic = %config.topic,
                    host = %config.host,
                    port = config.port,
                    qos = config.qos,
                    publisher = self.publisher.name(),
                    "relay loaded"
                );
                self.state = State::Active(config);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "relay failed to load");
                self.state = State::LoadFailed(err.clone());
                Err(RelayError::LoadFailed(err))
            }
        }
    }

    /// Returns the lifecycle state.
    pub const fn status(&self) -> RelayStatus {
        match self.state {
            State::Unloaded => RelayStatus::Unloaded,
            State::Active(_) => RelayStatus::Active,
            State::LoadFailed(_) => RelayStatus::LoadFailed,
        }
    }

    /// Returns the configuration while active.
    pub const fn config(&self) -> Option<&RelayConfig> {
        match &self.state {
            State::Active(config) => Some(config),
            State::Unloaded | State::LoadFailed(_) => None,
        }
    }

    /// Returns the error that made loading fail, if it did.
    pub const fn load_error(&self) -> Option<&ArgError> {
        match &self.state {
            State::LoadFailed(err) => Some(err),
            State::Unloaded | State::Active(_) => None,
        }
    }

    /// Returns the event counters.
    pub const fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// Returns the publisher.
    pub const fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Handles a channel message.
    pub fn on_channel_message(&mut self, sender: &str, channel: &str, text: &str) -> RelayOutcome {
        self.handle(&ChatEvent::new(EventKind::Message, sender, channel, text))
    }

    /// Handles a channel action.
    pub fn on_channel_action(&mut self, sender: &str, channel: &str, text: &str) -> RelayOutcome {
        self.handle(&ChatEvent::new(EventKind::Action, sender, channel, text))
    }

    /// Runs one event through the pipeline.
    pub fn handle(&mut self, event: &ChatEvent) -> RelayOutcome {
        let State::Active(config) = &self.state else {
            debug!(status = %self.status(), "relay inactive, dropping event");
            return RelayOutcome::NotActive;
        };
        self.stats.received += 1;

        if !config.matches_channel(&event.channel) {
            debug!(channel = %event.channel, "event for another channel");
            self.stats.ignored += 1;
            return RelayOutcome::IgnoredChannel;
        }

        let payload = event.formatted();

        if !should_relay(self.attachment.is_local_user_attached()) {
            debug!(kind = %event.kind, "local client attached, not relaying");
            self.stats.skipped_attached += 1;
            return RelayOutcome::SkippedAttached;
        }

        let request = PublishRequest::from_config(config, payload);
        match self.publisher.publish(&request) {
            Ok(()) => {
                self.stats.published += 1;
                RelayOutcome::Published(request.payload)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    topic = %request.topic,
                    kind = %event.kind,
                    "failed to relay event"
                );
                self.stats.failed += 1;
                RelayOutcome::PublishFailed(err)
            }
        }
    }
}
