//! Flag string validation.
//!
//! Validation runs in four steps, each exposed on its own so hosts and
//! tests can probe them:
//!
//! 1. [`contains_required_args`]: every required flag occurs in the raw text
//! 2. [`tokenize`]: split on `=` and `--` and re-pair fragments positionally
//! 3. [`parse_args`]: pick the value following each required flag
//! 4. [`is_valid_module_args`]: all required flags present, no empty values
//!
//! [`validate`] chains them and maps each failing step to its own
//! [`ArgError`] variant.

use super::FLAG_PREFIX;
use crate::error::ArgError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Flag to value mapping recovered from a raw argument string.
pub type ParsedArgs = BTreeMap<String, String>;

#[allow(clippy::expect_used)]
fn split_pattern() -> &'static Regex {
    static SPLIT: OnceLock<Regex> = OnceLock::new();
    SPLIT.get_or_init(|| Regex::new("=|--").expect("valid regex"))
}

/// Returns true when every required flag occurs as a substring of `raw`.
///
/// # Examples
///
/// ```
/// use relay_out::args::contains_required_args;
///
/// assert!(contains_required_args("--a=1 --b=2", &["--a", "--b"]));
/// assert!(!contains_required_args("--a=1", &["--a", "--b"]));
/// ```
pub fn contains_required_args<S: AsRef<str>>(raw: &str, required: &[S]) -> bool {
    required.iter().all(|key| raw.contains(key.as_ref()))
}

/// Splits a raw flag string into an alternating flag/value token sequence.
///
/// The trimmed input is split on `=` and on `--`; fragments that are blank
/// after trimming are dropped. Remaining fragments at even positions become
/// flag names (prefixed with `--`), odd positions become values. Values may
/// contain spaces; only surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use relay_out::args::tokenize;
///
/// assert_eq!(tokenize("--a=x y --b=2"), vec!["--a", "x y", "--b", "2"]);
/// assert_eq!(tokenize("--a=1 --b=2"), vec!["--a", "1", "--b", "2"]);
/// ```
pub fn tokenize(raw: &str) -> Vec<String> {
    split_pattern()
        .split(raw.trim())
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(index, fragment)| {
            if index % 2 == 0 {
                format!("{FLAG_PREFIX}{fragment}")
            } else {
                fragment.to_string()
            }
        })
        .collect()
}

/// Extracts the value of each required flag from a raw flag string.
///
/// A flag whose following token is missing, empty or itself a required flag
/// name is left out of the result, so a dropped value never shifts the next
/// flag name into its place. Unrecognized flags are ignored.
///
/// # Errors
///
/// Returns [`ArgError::Lookup`] if a required flag is absent from the token
/// sequence, which happens when the flag is missing outright or when an
/// earlier dropped value shifted it into a value position.
pub fn parse_args<S: AsRef<str>>(raw: &str, required: &[S]) -> Result<ParsedArgs, ArgError> {
    let tokens = tokenize(raw);
    let mut parsed = ParsedArgs::new();

    for key in required {
        let key = key.as_ref();
        let index = tokens
            .iter()
            .position(|token| token == key)
            .ok_or_else(|| ArgError::Lookup {
                key: key.to_string(),
            })?;

        if let Some(value) = tokens.get(index + 1)
            && !value.is_empty()
            && !required.iter().any(|k| k.as_ref() == value)
        {
            parsed.insert(key.to_string(), value.clone());
        }
    }

    Ok(parsed)
}

/// Returns true when `parsed` has every required flag and no empty values.
///
/// Extra flags in `parsed` are allowed, but their values must be non-empty
/// too.
pub fn is_valid_module_args<S: AsRef<str>>(parsed: &ParsedArgs, required: &[S]) -> bool {
    required
        .iter()
        .all(|key| parsed.contains_key(key.as_ref()))
        && parsed.values().all(|value| !value.is_empty())
}

/// Validates a raw flag string against the required flag set.
///
/// # Errors
///
/// - [`ArgError::Missing`] if a required flag is not in `raw` at all.
/// - [`ArgError::Lookup`] if a required flag is lost during tokenization.
/// - [`ArgError::Invalid`] if a required flag ends up without a value.
///
/// # Examples
///
/// ```
/// use relay_out::args::validate;
///
/// let parsed = validate("--t0=zero --t1=one", &["--t0", "--t1"]).unwrap();
/// assert_eq!(parsed["--t1"], "one");
/// ```
pub fn validate<S: AsRef<str>>(raw: &str, required: &[S]) -> Result<ParsedArgs, ArgError> {
    let required_list = || required.iter().map(|k| k.as_ref().to_string()).collect();

    if !contains_required_args(raw, required) {
        return Err(ArgError::Missing {
            raw: raw.to_string(),
            required: required_list(),
        });
    }

    let parsed = parse_args(raw, required)?;

    if !is_valid_module_args(&parsed, required) {
        return Err(ArgError::Invalid {
            parsed,
            required: required_list(),
        });
    }

    Ok(parsed)
}
