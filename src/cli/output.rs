//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{ChatEvent, RelayConfig};
use crate::error::Error;
use crate::relay::{RelayStats, RelayStatus};
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a validated relay configuration.
#[must_use]
pub fn format_config(config: &RelayConfig, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_config_text(config),
        OutputFormat::Json => format_json(config),
    }
}

fn format_config_text(config: &RelayConfig) -> String {
    let mut output = String::new();
    output.push_str("Module args OK\n");
    output.push_str("==============\n\n");
    let _ = writeln!(output, "  Topic:         {}", config.topic);
    let _ = writeln!(output, "  Broker:        {}:{}", config.host, config.port);
    let _ = writeln!(output, "  QoS:           {}", config.qos);
    let _ = writeln!(output, "  Client ID:     {}", config.client_id);
    let _ = writeln!(output, "  Network:       {}", config.network_name);
    let _ = writeln!(output, "  Channel:       {}", config.channel);
    output
}

/// Formats the summary printed after a relay run.
#[must_use]
pub fn format_run_summary(
    status: RelayStatus,
    publisher: &str,
    stats: &RelayStats,
    malformed: u64,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Relay {status} ({publisher})");
            let _ = writeln!(output, "  Received:      {}", stats.received);
            let _ = writeln!(output, "  Published:     {}", stats.published);
            let _ = writeln!(output, "  Failed:        {}", stats.failed);
            let _ = writeln!(output, "  Attached skip: {}", stats.skipped_attached);
            let _ = writeln!(output, "  Other channel: {}", stats.ignored);
            if malformed > 0 {
                let _ = writeln!(output, "  Malformed:     {malformed}");
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct RunSummary<'a> {
                status: RelayStatus,
                publisher: &'a str,
                #[serde(flatten)]
                stats: &'a RelayStats,
                malformed: u64,
            }
            format_json(&RunSummary {
                status,
                publisher,
                stats,
                malformed,
            })
        }
    }
}

/// Formats a single event's display line.
#[must_use]
pub fn format_event_line(event: &ChatEvent, format: OutputFormat) -> String {
    let line = event.formatted();
    match format {
        OutputFormat::Text => format!("{line}\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct FormattedEvent<'a> {
                #[serde(flatten)]
                event: &'a ChatEvent,
                formatted: String,
            }
            format_json(&FormattedEvent {
                event,
                formatted: line,
            })
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
