//! Error types for relay-out operations.
//!
//! This module provides the error hierarchy using `thiserror` for argument
//! validation, broker publishing, relay lifecycle and CLI commands.

use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for relay-out operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Module argument validation errors.
    #[error("argument error: {0}")]
    Args(#[from] ArgError),

    /// Broker publishing errors.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// Relay lifecycle errors.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors raised while validating the module argument string.
///
/// All of these are terminal for a relay session: the relay never
/// activates after one of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A required flag does not occur anywhere in the raw string.
    #[error("Missing required args, found: {raw}, required: {required:?}")]
    Missing {
        /// The raw argument string as received.
        raw: String,
        /// The full required flag list.
        required: Vec<String>,
    },

    /// A required flag vanished once the string was tokenized.
    #[error("required arg {key} not found in parsed tokens")]
    Lookup {
        /// The flag that could not be located.
        key: String,
    },

    /// Parsed arguments are incomplete or carry empty values.
    #[error("Invalid module args, found: {parsed:?}, required: {required:?}")]
    Invalid {
        /// The mapping recovered from the raw string.
        parsed: BTreeMap<String, String>,
        /// The full required flag list.
        required: Vec<String>,
    },

    /// A flag value could not be converted to its typed form.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// The flag whose value is invalid.
        key: String,
        /// The offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Broker publishing errors.
///
/// The relay treats these as non-fatal: they are logged and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Connecting to or talking with the broker failed.
    #[error("connection to {host}:{port} failed: {reason}")]
    Connection {
        /// Broker host.
        host: String,
        /// Broker port.
        port: u16,
        /// Transport failure description.
        reason: String,
    },

    /// The broker did not complete the exchange in time.
    #[error("timed out after {seconds}s waiting for broker {host}:{port}")]
    Timeout {
        /// Broker host.
        host: String,
        /// Broker port.
        port: u16,
        /// Timeout that elapsed.
        seconds: u64,
    },

    /// The client refused the request before it reached the network.
    #[error("client error: {0}")]
    Client(String),

    /// The request itself is not publishable.
    #[error("publish rejected: {0}")]
    Rejected(String),
}

/// Relay lifecycle errors.
#[derive(Error, Debug)]
pub enum RelayError {
    /// `load` was called on a relay that already left the unloaded state.
    #[error("relay already loaded (state: {state})")]
    AlreadyLoaded {
        /// The state the relay is in.
        state: String,
    },

    /// Loading failed; the relay stays inactive for the session.
    #[error("Failed to load module: {0}")]
    LoadFailed(#[source] ArgError),
}

/// I/O errors for the stand-alone host.
#[derive(Error, Debug)]
pub enum IoError {
    /// Reading an input stream failed.
    #[error("failed to read {source_name}: {reason}")]
    ReadFailed {
        /// What was being read.
        source_name: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The relay module refused to load.
    #[error("module load rejected: {0}")]
    LoadRejected(String),

    /// An input event line could not be decoded.
    #[error("invalid event on line {line}: {reason}")]
    InvalidEvent {
        /// 1-based input line number.
        line: usize,
        /// Decoder message.
        reason: String,
    },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rumqttc::ClientError> for PublishError {
    fn from(err: rumqttc::ClientError) -> Self {
        Self::Client(err.to_string())
    }
}
