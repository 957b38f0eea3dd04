//! Static provider credentials and environment-driven defaults.

use std::fmt;

/// Environment variable consulted by [`EcClientBuilder::from_env`](crate::EcClientBuilder::from_env)
/// for the Finnhub API key.
pub const API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Environment variable naming the IANA timezone event times are rendered in.
pub const TIMEZONE_ENV: &str = "EARNINGS_CAL_TZ";

/// Values that ship in sample configs and must never reach the network.
const PLACEHOLDERS: &[&str] = &[
    "your_api_key",
    "your-api-key",
    "your_api_key_here",
    "api_key",
    "apikey",
    "changeme",
    "change_me",
    "replace_me",
    "todo",
    "none",
    "null",
];

/// A provider API key that has been checked against well-known placeholder values.
///
/// The key is only constructible through [`ApiKey::parse`], so holding one means
/// presence was validated when the client was built rather than mid-call.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Accepts a configured key, returning `None` for empty or placeholder values.
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let key = raw.as_ref().trim();
        if is_placeholder(key) {
            return None;
        }
        Some(Self(key.to_string()))
    }

    /// The key as sent on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Returns `true` for values that look like an unfilled configuration template.
pub fn is_placeholder(raw: &str) -> bool {
    let key = raw.trim();
    if key.is_empty() {
        return true;
    }
    if key.starts_with('<') && key.ends_with('>') {
        return true;
    }
    if key.chars().all(|c| c == '*' || c == 'x' || c == 'X') {
        return true;
    }
    let lower = key.to_ascii_lowercase();
    PLACEHOLDERS.contains(&lower.as_str())
}
