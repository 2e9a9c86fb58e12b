//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::core::EventKind;
use crate::publish::{DEFAULT_KEEP_ALIVE_SECS, DEFAULT_TIMEOUT_SECS};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// relay-out: relay IRC channel traffic to an MQTT broker.
///
/// Messages and actions on one channel are published to a broker topic
/// while no local client is attached.
#[derive(Parser, Debug)]
#[command(name = "relay-out")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a module argument string and show the resulting config.
    Check {
        /// Module argument string, e.g. "--topic=irc --host=localhost ...".
        #[arg(long = "args", env = "RELAY_OUT_ARGS", allow_hyphen_values = true)]
        module_args: String,
    },

    /// Relay JSON-lines chat events to the broker.
    ///
    /// Each input line is an object with `kind` ("message" or "action"),
    /// `sender`, `channel` and `text`.
    Run {
        /// Module argument string, e.g. "--topic=irc --host=localhost ...".
        #[arg(long = "args", env = "RELAY_OUT_ARGS", allow_hyphen_values = true)]
        module_args: String,

        /// Event input file (reads stdin if not provided).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// A local client counts as attached while this file exists.
        #[arg(long)]
        attach_marker: Option<PathBuf>,

        /// Seconds allowed for each broker exchange.
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// MQTT keep-alive interval in seconds.
        #[arg(long, default_value_t = DEFAULT_KEEP_ALIVE_SECS)]
        keep_alive: u64,

        /// Log what would be published instead of contacting the broker.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the display line for a single event.
    Format {
        /// Event kind.
        #[arg(short, long, value_enum, default_value = "message")]
        kind: KindArg,

        /// Sender nick.
        sender: String,

        /// Message text.
        text: String,
    },
}

/// Event kind as given on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// Channel message.
    Message,
    /// `/me` action.
    Action,
}

impl From<KindArg> for EventKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Message => Self::Message,
            KindArg::Action => Self::Action,
        }
    }
}
