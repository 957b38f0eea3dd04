//! User-facing wording for each fetch outcome.

use super::model::{FetchResult, ProviderId};
use crate::core::config::API_KEY_ENV;

impl FetchResult {
    /// One sentence describing the outcome for `ticker`.
    pub fn message(&self, ticker: &str, provider: ProviderId) -> String {
        match self {
            FetchResult::Events(events) => match events.len() {
                1 => format!("1 earnings date found for {ticker}."),
                n => format!("{n} earnings dates found for {ticker}."),
            },
            FetchResult::Empty => format!(
                "No earnings dates listed for {ticker} by {}.",
                provider.source_name()
            ),
            FetchResult::RateLimited => format!(
                "{} is rate limiting requests right now.",
                provider.source_name()
            ),
            FetchResult::MissingCredentials => format!(
                "{} needs an API key and none is configured.",
                provider.source_name()
            ),
            FetchResult::ProviderError(msg) => format!(
                "Could not fetch data from {}: {msg}",
                provider.source_name()
            ),
            FetchResult::MalformedPayload(msg) => format!(
                "{} returned data in an unexpected format: {msg}",
                provider.source_name()
            ),
        }
    }

    /// What the user can try next. Every outcome has one.
    pub fn hint(&self, ticker: &str) -> String {
        match self {
            FetchResult::Events(_) => "Use a date's link to add it to your calendar.".into(),
            FetchResult::Empty if !ticker.contains('.') => format!(
                "Check the symbol. Non-US listings need an exchange suffix, e.g. {ticker}.HE for Helsinki."
            ),
            FetchResult::Empty => "Check the symbol or try another data source.".into(),
            FetchResult::RateLimited => "Wait a minute and try again.".into(),
            FetchResult::MissingCredentials => {
                format!("Set {API_KEY_ENV} or pick a provider that needs no key.")
            }
            FetchResult::ProviderError(_) | FetchResult::MalformedPayload(_) => {
                "Try again later or switch to another data source.".into()
            }
        }
    }
}
