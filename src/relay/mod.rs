//! Relay pipeline for relay-out.
//!
//! - [`gate`]: the attachment gate deciding whether to forward at all
//! - [`attachment`]: sources for the host's "is a client attached" fact
//! - [`orchestrator`]: the [`Relay`] state machine tying it together
//! - [`module`]: the callback surface a chat-server host drives

pub mod attachment;
pub mod gate;
pub mod module;
pub mod orchestrator;

pub use attachment::{AttachmentSource, MarkerFileAttachment, StaticAttachment};
pub use gate::should_relay;
pub use module::{HostAction, HostModule, MODULE_DESCRIPTION, RelayModule, WEB_MENU_TITLE};
pub use orchestrator::{Relay, RelayOutcome, RelayStats, RelayStatus};
