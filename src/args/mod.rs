//! Module argument handling for relay-out.
//!
//! The relay is configured with a single flag string such as
//! `--topic=irc --host=localhost --port=1883 ...`. This module recovers a
//! flag to value mapping from that string and checks it against the set of
//! flags the relay requires.

pub mod validator;

pub use validator::{
    ParsedArgs, contains_required_args, is_valid_module_args, parse_args, tokenize, validate,
};

/// Broker topic to publish to.
pub const TOPIC_KEY: &str = "--topic";

/// Broker hostname.
pub const HOST_KEY: &str = "--host";

/// Broker port.
pub const PORT_KEY: &str = "--port";

/// Broker QoS level.
pub const QOS_KEY: &str = "--qos";

/// Publisher client identity.
pub const CLIENT_ID_KEY: &str = "--client-id";

/// Source network label.
pub const NETWORK_NAME_KEY: &str = "--network-name";

/// Channel to monitor.
pub const CHANNEL_KEY: &str = "--channel";

/// Flags every relay configuration must supply, in diagnostic order.
pub const REQUIRED_KEYS: [&str; 7] = [
    TOPIC_KEY,
    HOST_KEY,
    PORT_KEY,
    QOS_KEY,
    CLIENT_ID_KEY,
    NETWORK_NAME_KEY,
    CHANNEL_KEY,
];

/// Marker that introduces a flag name.
pub const FLAG_PREFIX: &str = "--";
