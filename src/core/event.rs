//! Chat events and their display formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of channel event the relay forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A regular channel message (`PRIVMSG`).
    Message,
    /// A `/me` action (CTCP ACTION).
    Action,
}

impl EventKind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single event observed on a channel.
///
/// # Examples
///
/// ```
/// use relay_out::core::{ChatEvent, EventKind};
///
/// let event = ChatEvent::message("nick", "#rust", "hello");
/// assert_eq!(event.kind, EventKind::Message);
/// assert_eq!(event.formatted(), "<nick> hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Message or action.
    pub kind: EventKind,

    /// Nick of the sender.
    pub sender: String,

    /// Channel the event was seen on.
    pub channel: String,

    /// Message body.
    pub text: String,
}

impl ChatEvent {
    /// Creates a new event.
    pub fn new(
        kind: EventKind,
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            sender: sender.into(),
            channel: channel.into(),
            text: text.into(),
        }
    }

    /// Creates a channel message event.
    pub fn message(
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(EventKind::Message, sender, channel, text)
    }

    /// Creates a channel action event.
    pub fn action(
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(EventKind::Action, sender, channel, text)
    }

    /// Renders this event as a display line.
    #[must_use]
    pub fn formatted(&self) -> String {
        format_event(self.kind, &self.sender, &self.text)
    }
}

/// Renders a chat event as a single display line.
///
/// Messages render as `<sender> text`, actions as `* sender text`.
#[must_use]
pub fn format_event(kind: EventKind, sender: &str, text: &str) -> String {
    match kind {
        EventKind::Message => format!("<{sender}> {text}"),
        EventKind::Action => format!("* {sender} {text}"),
    }
}
