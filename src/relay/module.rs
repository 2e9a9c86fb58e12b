//! Host module adapter.
//!
//! Chat-server hosts load the relay as a module and drive it through a
//! fixed set of callbacks. [`RelayModule`] implements that surface on top of
//! a [`Relay`] it owns for the whole session.

use super::attachment::AttachmentSource;
use super::orchestrator::{Relay, RelayOutcome};
use crate::error::{ArgError, RelayError};
use crate::publish::Publisher;
use std::fmt::Write;
use tracing::debug;

/// Short module description shown by hosts.
pub const MODULE_DESCRIPTION: &str = "Relay messages from IRC to obs";

/// Title of the module's web menu entry.
pub const WEB_MENU_TITLE: &str = "relay_out IRC to mosquitto mq";

/// Signal returned to the host after a callback.
///
/// The relay only observes events, so the host is always told to keep
/// passing them on to other modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Let the host pass the event on to other modules.
    Continue,
}

/// Callback surface a chat-server host drives.
pub trait HostModule {
    /// Loads the module with its argument string.
    ///
    /// Diagnostics for the host are appended to `message`. Returns false if
    /// the module must not be activated.
    fn on_load(&mut self, args: &str, message: &mut String) -> bool;

    /// Called for every channel message.
    fn on_chan_msg(&mut self, nick: &str, channel: &str, message: &str) -> HostAction;

    /// Called for every channel action.
    fn on_chan_action(&mut self, nick: &str, channel: &str, message: &str) -> HostAction;

    /// Called when a user sends the module a command.
    fn on_mod_command(&mut self, command: &str) -> HostAction;

    /// Title for the host's web menu.
    fn web_menu_title(&self) -> &'static str;

    /// Short description shown in the host's module list.
    fn description(&self) -> &'static str {
        MODULE_DESCRIPTION
    }
}

/// Relay module owned by a host for one session.
#[derive(Debug)]
pub struct RelayModule<P, A> {
    relay: Relay<P, A>,
}

impl<P: Publisher, A: AttachmentSource> RelayModule<P, A> {
    /// Creates an unloaded module.
    pub const fn new(publisher: P, attachment: A) -> Self {
        Self {
            relay: Relay::new(publisher, attachment),
        }
    }

    /// Returns the wrapped relay.
    pub const fn relay(&self) -> &Relay<P, A> {
        &self.relay
    }

    fn log_outcome(outcome: &RelayOutcome) {
        debug!(?outcome, "event handled");
    }
}

impl<P: Publisher, A: AttachmentSource> HostModule for RelayModule<P, A> {
    fn on_load(&mut self, args: &str, message: &mut String) -> bool {
        message.push('\n');
        match self.relay.load(args) {
            Ok(()) => {
                message.push_str("Passed required arg check\n");
                message.push_str("Parsed module args\n");
                message.push_str("Passed module arg check\n");
                if let Some(config) = self.relay.config() {
                    let _ = writeln!(message, "Module args: {config:?}");
                }
                true
            }
            // Validation rejections replace the diagnostic outright.
            Err(RelayError::LoadFailed(
                err @ (ArgError::Missing { .. } | ArgError::Invalid { .. }),
            )) => {
                *message = err.to_string();
                false
            }
            Err(RelayError::LoadFailed(err)) => {
                message.push_str("Passed required arg check\n");
                if matches!(err, ArgError::InvalidValue { .. }) {
                    message.push_str("Parsed module args\n");
                    message.push_str("Passed module arg check\n");
                }
                let _ = write!(message, "Failed to load module: \n{err}");
                false
            }
            Err(err) => {
                let _ = write!(message, "{err}");
                false
            }
        }
    }

    fn on_chan_msg(&mut self, nick: &str, channel: &str, message: &str) -> HostAction {
        Self::log_outcome(&self.relay.on_channel_message(nick, channel, message));
        HostAction::Continue
    }

    fn on_chan_action(&mut self, nick: &str, channel: &str, message: &str) -> HostAction {
        Self::log_outcome(&self.relay.on_channel_action(nick, channel, message));
        HostAction::Continue
    }

    fn on_mod_command(&mut self, command: &str) -> HostAction {
        debug!(command, "module commands are not supported");
        HostAction::Continue
    }

    fn web_menu_title(&self) -> &'static str {
        WEB_MENU_TITLE
    }
}
