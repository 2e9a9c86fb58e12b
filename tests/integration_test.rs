//! Integration tests for relay-out.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use relay_out::core::{ChatEvent, EventKind, RelayConfig, format_event};
use relay_out::error::{ArgError, PublishError};
use relay_out::publish::{PublishRequest, Publisher};
use relay_out::relay::{
    HostAction, HostModule, MarkerFileAttachment, Relay, RelayModule, RelayOutcome, RelayStatus,
    StaticAttachment,
};
use tempfile::TempDir;

const MODULE_ARGS: &str = "--topic=irc/libera/rust --host=localhost --port=1883 --qos=0 \
                           --client-id=relay-out --network-name=libera --channel=#Test";

/// Publisher that records requests instead of sending them.
#[derive(Default)]
struct RecordingPublisher {
    requests: Vec<PublishRequest>,
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, request: &PublishRequest) -> Result<(), PublishError> {
        self.requests.push(request.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn loaded_relay(attached: bool) -> Relay<RecordingPublisher, StaticAttachment> {
    let mut relay = Relay::new(RecordingPublisher::default(), StaticAttachment(attached));
    relay.load(MODULE_ARGS).expect("load failed");
    relay
}

mod validation_tests {
    use super::*;
    use relay_out::args::{
        contains_required_args, is_valid_module_args, parse_args, validate,
    };

    const REQUIRED: [&str; 3] = ["--t0", "--t1", "--t2"];

    #[test]
    fn test_validate_example() {
        let parsed = validate("--t0=zero --t1=one --t2=two", &REQUIRED).expect("validate");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed["--t0"], "zero");
        assert_eq!(parsed["--t1"], "one");
        assert_eq!(parsed["--t2"], "two");
    }

    #[test]
    fn test_extra_flags_not_included() {
        let parsed = validate("--t0=zero --extra=x --t1=one --t2=two --more=y", &REQUIRED)
            .expect("validate");
        assert_eq!(parsed.len(), 3);
        assert!(!parsed.contains_key("--extra"));
        assert!(is_valid_module_args(&parsed, &REQUIRED));
    }

    #[test]
    fn test_removed_value_never_yields_partial_config() {
        let result = validate("--t0= --t1=one --t2=two", &REQUIRED);
        assert!(matches!(
            result,
            Err(ArgError::Lookup { .. } | ArgError::Invalid { .. })
        ));
    }

    #[test]
    fn test_omitted_key_is_missing() {
        let result = validate("--t0=zero --t1=one", &REQUIRED);
        assert!(matches!(result, Err(ArgError::Missing { .. })));
    }

    #[test]
    fn test_key_present_only_as_value_is_lookup_failure() {
        // "--t2" appears in the text but never as a flag token.
        assert!(contains_required_args("--t0=zero --t1=--t2", &REQUIRED));
        let result = parse_args("--t0=zero --t1=--t2", &REQUIRED);
        assert!(matches!(result, Err(ArgError::Lookup { ref key }) if key == "--t1" || key == "--t2"));
    }

    #[test]
    fn test_relay_config_requires_every_flag() {
        for key in relay_out::REQUIRED_KEYS {
            let raw: String = MODULE_ARGS
                .split_whitespace()
                .filter(|token| !token.starts_with(&format!("{key}=")))
                .collect::<Vec<_>>()
                .join(" ");
            let err = RelayConfig::from_args(&raw).expect_err(key);
            assert!(
                matches!(err, ArgError::Missing { .. }),
                "{key}: unexpected {err:?}"
            );
        }
    }
}

mod relay_tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_attached_suppresses_publish() {
        let mut relay = loaded_relay(true);
        let outcome = relay.handle(&ChatEvent::message("nick", "#Test", "hello"));
        assert_eq!(outcome, RelayOutcome::SkippedAttached);
        assert!(relay.publisher().requests.is_empty());
    }

    #[test]
    fn test_detached_publishes_exactly_once() {
        let mut relay = loaded_relay(false);
        relay.handle(&ChatEvent::message("nick", "#test", "hello"));

        let requests = &relay.publisher().requests;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            PublishRequest {
                topic: "irc/libera/rust".to_string(),
                host: "localhost".to_string(),
                port: 1883,
                payload: "<nick> hello".to_string(),
                qos: 0,
                client_id: "relay-out".to_string(),
                retain: false,
            }
        );
    }

    #[test_case("#Test", true ; "exact")]
    #[test_case("#test", true ; "lowercase")]
    #[test_case("#TEST", true ; "uppercase")]
    #[test_case("#test2", false ; "longer name")]
    #[test_case("#other", false ; "other channel")]
    fn test_channel_match(channel: &str, relayed: bool) {
        let mut relay = loaded_relay(false);
        relay.on_channel_message("nick", channel, "hello");
        assert_eq!(relay.publisher().requests.len(), usize::from(relayed));
    }

    #[test_case(EventKind::Message, "nick", "hello", "<nick> hello" ; "message")]
    #[test_case(EventKind::Action, "nick", "waves", "* nick waves" ; "action")]
    #[test_case(EventKind::Message, "n", "two  spaces", "<n> two  spaces" ; "text kept verbatim")]
    fn test_format(kind: EventKind, sender: &str, text: &str, expected: &str) {
        assert_eq!(format_event(kind, sender, text), expected);
    }

    #[test]
    fn test_marker_file_attachment() {
        let temp = TempDir::new().expect("temp dir");
        let marker = temp.path().join("attached");
        let mut relay = Relay::new(
            RecordingPublisher::default(),
            MarkerFileAttachment::new(&marker),
        );
        relay.load(MODULE_ARGS).expect("load");

        relay.on_channel_message("a", "#test", "before");
        std::fs::write(&marker, b"").expect("touch marker");
        relay.on_channel_message("b", "#test", "during");
        std::fs::remove_file(&marker).expect("remove marker");
        relay.on_channel_action("c", "#test", "after");

        let payloads: Vec<_> = relay
            .publisher()
            .requests
            .iter()
            .map(|r| r.payload.clone())
            .collect();
        assert_eq!(payloads, vec!["<a> before", "* c after"]);
    }

    #[test]
    fn test_host_module_lifecycle() {
        let mut module = RelayModule::new(RecordingPublisher::default(), StaticAttachment(false));
        let mut message = String::new();
        assert!(module.on_load(MODULE_ARGS, &mut message));
        assert_eq!(module.on_chan_action("nick", "#test", "waves"), HostAction::Continue);
        assert_eq!(module.relay().status(), RelayStatus::Active);
        assert_eq!(module.relay().publisher().requests.len(), 1);
    }

    #[test]
    fn test_host_module_load_failure_never_activates() {
        let mut module = RelayModule::new(RecordingPublisher::default(), StaticAttachment(false));
        let mut message = String::new();
        let raw = MODULE_ARGS.replace("--channel=#Test", "--channel=");
        assert!(!module.on_load(&raw, &mut message));
        assert!(message.starts_with("Invalid module args"));
        assert_eq!(module.on_chan_msg("nick", "#Test", "hi"), HostAction::Continue);
        assert!(module.relay().publisher().requests.is_empty());
    }
}

mod property_tests {
    use proptest::prelude::*;
    use relay_out::args::{contains_required_args, validate};
    use std::collections::BTreeMap;

    fn raw_from(map: &BTreeMap<String, String>) -> String {
        map.iter()
            .map(|(k, v)| format!("--{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    proptest! {
        #[test]
        fn contains_all_present_keys(
            map in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,8}", 1..6)
        ) {
            let raw = raw_from(&map);
            let required: Vec<String> = map.keys().map(|k| format!("--{k}")).collect();
            prop_assert!(contains_required_args(&raw, &required));
        }

        #[test]
        fn removing_a_key_breaks_containment(
            map in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,8}", 1..6),
            pick in any::<prop::sample::Index>()
        ) {
            let raw = raw_from(&map);
            let required: Vec<String> = map.keys().map(|k| format!("--{k}")).collect();
            let removed = &required[pick.index(required.len())];
            let stripped = raw.replace(removed.as_str(), "");
            prop_assert!(!contains_required_args(&stripped, &required));
        }

        #[test]
        fn validate_recovers_every_value(
            map in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,8}", 1..6)
        ) {
            let raw = raw_from(&map);
            let required: Vec<String> = map.keys().map(|k| format!("--{k}")).collect();
            let parsed = validate(&raw, &required).expect("validate");
            let expected: BTreeMap<String, String> =
                map.iter().map(|(k, v)| (format!("--{k}"), v.clone())).collect();
            prop_assert_eq!(parsed, expected);
        }
    }
}

/// CLI command integration tests.
mod cli_tests {
    use super::MODULE_ARGS;
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn relay_out() -> Command {
        let mut cmd = Command::cargo_bin("relay-out").expect("binary");
        cmd.env_remove("RELAY_OUT_ARGS").env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_check_valid_args() {
        relay_out()
            .arg("check")
            .arg(format!("--args={MODULE_ARGS}"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Broker:        localhost:1883"))
            .stdout(predicate::str::contains("#Test"));
    }

    #[test]
    fn test_check_from_env() {
        relay_out()
            .env("RELAY_OUT_ARGS", MODULE_ARGS)
            .args(["--format", "json", "check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"client_id\": \"relay-out\""));
    }

    #[test]
    fn test_check_missing_args_fails() {
        relay_out()
            .args(["check", "--args=--topic=irc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing required args"));
    }

    #[test]
    fn test_format_action() {
        relay_out()
            .args(["format", "--kind", "action", "nick", "waves"])
            .assert()
            .success()
            .stdout("* nick waves\n");
    }

    #[test]
    fn test_run_dry_run() {
        let input = concat!(
            r##"{"kind":"message","sender":"alice","channel":"#test","text":"hello"}"##,
            "\n",
            r##"{"kind":"action","sender":"bob","channel":"#TEST","text":"waves"}"##,
            "\n",
            r##"{"kind":"message","sender":"carol","channel":"#elsewhere","text":"hi"}"##,
            "\n",
            "garbage\n",
        );
        relay_out()
            .args(["--format", "json", "run", "--dry-run"])
            .arg(format!("--args={MODULE_ARGS}"))
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"published\": 2"))
            .stdout(predicate::str::contains("\"ignored\": 1"))
            .stdout(predicate::str::contains("\"malformed\": 1"));
    }

    #[test]
    fn test_run_attached_publishes_nothing() {
        let temp = TempDir::new().expect("temp dir");
        let marker = temp.path().join("attached");
        std::fs::write(&marker, b"").expect("touch marker");

        relay_out()
            .args(["--format", "json", "run", "--dry-run"])
            .arg(format!("--args={MODULE_ARGS}"))
            .arg("--attach-marker")
            .arg(&marker)
            .write_stdin(
                r##"{"kind":"message","sender":"alice","channel":"#test","text":"hello"}"##,
            )
            .assert()
            .success()
            .stdout(predicate::str::contains("\"published\": 0"))
            .stdout(predicate::str::contains("\"skipped_attached\": 1"));
    }

    #[test]
    fn test_run_rejects_invalid_args() {
        relay_out()
            .args(["run", "--dry-run", "--args=--topic=irc"])
            .write_stdin("")
            .assert()
            .failure()
            .stderr(predicate::str::contains("module load rejected"));
    }

    #[test]
    fn test_run_reads_input_file() {
        let temp = TempDir::new().expect("temp dir");
        let input = temp.path().join("events.jsonl");
        std::fs::write(
            &input,
            r##"{"kind":"message","sender":"alice","channel":"#Test","text":"hello"}"##,
        )
        .expect("write input");

        relay_out()
            .args(["run", "--dry-run"])
            .arg(format!("--args={MODULE_ARGS}"))
            .arg("--input")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Relay active (dry-run)"))
            .stdout(predicate::str::contains("Published:     1"));
    }
}
