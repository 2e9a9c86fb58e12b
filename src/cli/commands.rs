//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{OutputFormat, format_config, format_event_line, format_run_summary};
use crate::cli::parser::{Cli, Commands, KindArg};
use crate::core::{ChatEvent, EventKind, RelayConfig};
use crate::error::{CommandError, IoError, Result};
use crate::publish::{DryRunPublisher, MqttPublisher, Publisher, PublisherOptions};
use crate::relay::{
    AttachmentSource, HostModule, MarkerFileAttachment, RelayModule, StaticAttachment,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Check { module_args } => cmd_check(module_args, format),
        Commands::Run {
            module_args,
            input,
            attach_marker,
            timeout,
            keep_alive,
            dry_run,
        } => {
            let publisher: Box<dyn Publisher> = if *dry_run {
                Box::new(DryRunPublisher::new())
            } else {
                Box::new(MqttPublisher::new(PublisherOptions::from_secs(
                    *timeout,
                    *keep_alive,
                )))
            };
            let attachment: Box<dyn AttachmentSource> = match attach_marker {
                Some(path) => Box::new(MarkerFileAttachment::new(path)),
                None => Box::new(StaticAttachment(false)),
            };
            cmd_run(module_args, input.as_deref(), publisher, attachment, format)
        }
        Commands::Format { kind, sender, text } => cmd_format(*kind, sender, text, format),
    }
}

// ==================== Command Implementations ====================

fn cmd_check(module_args: &str, format: OutputFormat) -> Result<String> {
    let config = RelayConfig::from_args(module_args)?;
    Ok(format_config(&config, format))
}

fn cmd_run(
    module_args: &str,
    input: Option<&Path>,
    publisher: Box<dyn Publisher>,
    attachment: Box<dyn AttachmentSource>,
    format: OutputFormat,
) -> Result<String> {
    let mut module = RelayModule::new(publisher, attachment);

    let mut message = String::new();
    if !module.on_load(module_args, &mut message) {
        return Err(CommandError::LoadRejected(message.trim().to_string()).into());
    }
    info!(
        module = module.description(),
        diagnostic = %message.trim(),
        "module loaded"
    );

    let malformed = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| IoError::ReadFailed {
                source_name: path.display().to_string(),
                reason: e.to_string(),
            })?;
            run_events(&mut module, BufReader::new(file))?
        }
        None => run_events(&mut module, io::stdin().lock())?,
    };

    let relay = module.relay();
    Ok(format_run_summary(
        relay.status(),
        relay.publisher().name(),
        relay.stats(),
        malformed,
        format,
    ))
}

fn cmd_format(kind: KindArg, sender: &str, text: &str, format: OutputFormat) -> Result<String> {
    let event = ChatEvent::new(EventKind::from(kind), sender, "", text);
    Ok(format_event_line(&event, format))
}

/// Feeds JSON-lines events from `reader` to a host module.
///
/// Blank lines are skipped. Lines that do not decode as a [`ChatEvent`] are
/// logged and skipped; the number of such lines is returned.
///
/// # Errors
///
/// Returns an error only if reading from `reader` fails.
pub fn run_events<M: HostModule, R: BufRead>(module: &mut M, reader: R) -> Result<u64> {
    let mut malformed = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| IoError::ReadFailed {
            source_name: "event input".to_string(),
            reason: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let event = match serde_json::from_str::<ChatEvent>(&line) {
            Ok(event) => event,
            Err(e) => {
                let err = CommandError::InvalidEvent {
                    line: index + 1,
                    reason: e.to_string(),
                };
                warn!(error = %err, "skipping event");
                malformed += 1;
                continue;
            }
        };

        match event.kind {
            EventKind::Message => module.on_chan_msg(&event.sender, &event.channel, &event.text),
            EventKind::Action => module.on_chan_action(&event.sender, &event.channel, &event.text),
        };
    }

    Ok(malformed)
}
