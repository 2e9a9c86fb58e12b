//! Attachment gate.

/// Returns true when an event should be forwarded to the broker.
///
/// Events are relayed only while no local client is attached; an attached
/// client already sees them directly.
///
/// # Examples
///
/// ```
/// use relay_out::relay::should_relay;
///
/// assert!(should_relay(false));
/// assert!(!should_relay(true));
/// ```
#[must_use]
pub const fn should_relay(is_attached: bool) -> bool {
    !is_attached
}
