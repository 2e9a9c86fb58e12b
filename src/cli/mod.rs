//! CLI layer for relay-out.
//!
//! The binary plays the host's role: it validates module argument strings
//! and feeds chat events from a JSON-lines stream through a relay module.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{execute, run_events};
pub use output::OutputFormat;
pub use parser::{Cli, Commands, KindArg};
