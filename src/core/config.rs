//! Typed relay configuration.
//!
//! A [`RelayConfig`] is the typed view of a validated argument mapping. It
//! can only be built from arguments that passed validation, so a relay
//! holding one never runs with a partial configuration.

use crate::args::{
    self, CHANNEL_KEY, CLIENT_ID_KEY, HOST_KEY, NETWORK_NAME_KEY, PORT_KEY, ParsedArgs, QOS_KEY,
    REQUIRED_KEYS, TOPIC_KEY,
};
use crate::error::ArgError;
use serde::Serialize;

/// Highest MQTT QoS level.
pub const MAX_QOS: u8 = 2;

/// Validated relay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayConfig {
    /// Broker topic to publish to.
    pub topic: String,

    /// Broker hostname.
    pub host: String,

    /// Broker port.
    pub port: u16,

    /// QoS level (0, 1 or 2).
    pub qos: u8,

    /// Publisher client identity.
    pub client_id: String,

    /// Label of the source network. Informational only.
    pub network_name: String,

    /// Channel to monitor, as configured.
    pub channel: String,
}

impl RelayConfig {
    /// Validates a raw module argument string and builds the typed config.
    ///
    /// # Errors
    ///
    /// Returns the [`ArgError`] of the first validation step that fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_out::core::RelayConfig;
    ///
    /// let config = RelayConfig::from_args(
    ///     "--topic=irc --host=localhost --port=1883 --qos=1 \
    ///      --client-id=relay --network-name=libera --channel=#rust",
    /// )
    /// .unwrap();
    /// assert_eq!(config.port, 1883);
    /// assert!(config.matches_channel("#RUST"));
    /// ```
    pub fn from_args(raw: &str) -> Result<Self, ArgError> {
        let parsed = args::validate(raw, &REQUIRED_KEYS)?;
        Self::from_parsed(&parsed)
    }

    /// Builds the typed config from an already validated mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::Invalid`] if a required flag is missing and
    /// [`ArgError::InvalidValue`] if `--port` or `--qos` do not convert.
    pub fn from_parsed(parsed: &ParsedArgs) -> Result<Self, ArgError> {
        if !args::is_valid_module_args(parsed, &REQUIRED_KEYS) {
            return Err(ArgError::Invalid {
                parsed: parsed.clone(),
                required: REQUIRED_KEYS.iter().map(ToString::to_string).collect(),
            });
        }

        let get = |key: &str| parsed.get(key).cloned().unwrap_or_default();

        let port_text = get(PORT_KEY);
        let port = port_text
            .parse::<u16>()
            .map_err(|e| ArgError::InvalidValue {
                key: PORT_KEY.to_string(),
                value: port_text.clone(),
                reason: e.to_string(),
            })?;

        let qos_text = get(QOS_KEY);
        let qos = qos_text
            .parse::<u8>()
            .map_err(|e| e.to_string())
            .and_then(|qos| {
                if qos <= MAX_QOS {
                    Ok(qos)
                } else {
                    Err(format!("QoS must be between 0 and {MAX_QOS}"))
                }
            })
            .map_err(|reason| ArgError::InvalidValue {
                key: QOS_KEY.to_string(),
                value: qos_text.clone(),
                reason,
            })?;

        Ok(Self {
            topic: get(TOPIC_KEY),
            host: get(HOST_KEY),
            port,
            qos,
            client_id: get(CLIENT_ID_KEY),
            network_name: get(NETWORK_NAME_KEY),
            channel: get(CHANNEL_KEY),
        })
    }

    /// Returns true when `channel` names the monitored channel.
    ///
    /// Comparison ignores case, as IRC channel names do.
    #[must_use]
    pub fn matches_channel(&self, channel: &str) -> bool {
        channel.to_lowercase() == self.channel.to_lowercase()
    }
}
