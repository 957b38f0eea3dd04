use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A calendar date, optionally with a wall-clock time of day.
///
/// Values are local to the client's configured timezone; providers that only
/// publish a day produce [`EventTime::Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// Day-level precision only.
    Date(NaiveDate),
    /// A day plus a time of day.
    DateTime(NaiveDateTime),
}

impl EventTime {
    /// The calendar day of the event.
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date(),
        }
    }

    /// The time of day, if the provider published one.
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            EventTime::Date(_) => None,
            EventTime::DateTime(dt) => Some(dt.time()),
        }
    }

    /// Resolves to a full timestamp, using `default_time` when only a day is known.
    pub fn at_or(&self, default_time: NaiveTime) -> NaiveDateTime {
        match self {
            EventTime::Date(d) => d.and_time(default_time),
            EventTime::DateTime(dt) => *dt,
        }
    }

    fn sort_key(&self) -> (NaiveDateTime, u8) {
        match self {
            EventTime::Date(d) => (d.and_time(NaiveTime::MIN), 0),
            EventTime::DateTime(dt) => (*dt, 1),
        }
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<NaiveDate> for EventTime {
    fn from(d: NaiveDate) -> Self {
        EventTime::Date(d)
    }
}

impl From<NaiveDateTime> for EventTime {
    fn from(dt: NaiveDateTime) -> Self {
        EventTime::DateTime(dt)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
        }
    }
}

/// How authoritative a reported earnings date is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// Taken from the provider's authoritative field.
    Confirmed,
    /// A provider projection published before the company confirms a date.
    Estimated,
}

/// One earnings report date for a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsEvent {
    /// Human-readable name of the event, e.g. `"Earnings Call"`.
    pub label: String,
    /// When the event happens.
    pub timestamp: EventTime,
    /// Whether the date is confirmed or estimated.
    pub confidence: Confidence,
}

impl EarningsEvent {
    pub(crate) fn new(label: impl Into<String>, timestamp: EventTime, confidence: Confidence) -> Self {
        Self {
            label: label.into(),
            timestamp,
            confidence,
        }
    }
}

/// Outcome of a single earnings fetch.
///
/// Every failure mode is a value; the fetcher never returns an error or panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum FetchResult {
    /// One or more events, in provider order or ascending by time.
    Events(Vec<EarningsEvent>),
    /// The provider has no earnings data for this ticker.
    Empty,
    /// The provider's request quota is exhausted.
    RateLimited,
    /// The provider needs an API key and none is configured.
    MissingCredentials,
    /// The network call failed or the provider returned an unexpected status.
    ProviderError(String),
    /// The response arrived but did not match any known payload shape.
    MalformedPayload(String),
}

impl FetchResult {
    /// Wraps a list of events, collapsing an empty list to [`FetchResult::Empty`].
    pub fn from_events(events: Vec<EarningsEvent>) -> Self {
        if events.is_empty() {
            FetchResult::Empty
        } else {
            FetchResult::Events(events)
        }
    }

    /// The events, or an empty slice for every other outcome.
    pub fn events(&self) -> &[EarningsEvent] {
        match self {
            FetchResult::Events(e) => e,
            _ => &[],
        }
    }

    /// `true` for [`FetchResult::ProviderError`] and [`FetchResult::MalformedPayload`].
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            FetchResult::ProviderError(_) | FetchResult::MalformedPayload(_)
        )
    }
}

/// Upstream source of earnings data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    /// Yahoo quoteSummary `calendarEvents` module.
    YahooCalendar,
    /// Yahoo v7 quote endpoint (`earningsTimestamp*` fields).
    YahooQuote,
    /// Finnhub earnings calendar (requires an API key).
    Finnhub,
    /// Data embedded in the Yahoo quote HTML page.
    YahooPage,
}

impl ProviderId {
    /// Every supported provider.
    pub const ALL: [ProviderId; 4] = [
        ProviderId::YahooCalendar,
        ProviderId::YahooQuote,
        ProviderId::Finnhub,
        ProviderId::YahooPage,
    ];

    /// Stable identifier, also accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            ProviderId::YahooCalendar => "yahoo-calendar",
            ProviderId::YahooQuote => "yahoo-quote",
            ProviderId::Finnhub => "finnhub",
            ProviderId::YahooPage => "yahoo-page",
        }
    }

    /// Name of the upstream data source, as shown to end users.
    pub const fn source_name(self) -> &'static str {
        match self {
            ProviderId::YahooCalendar => "Yahoo Finance calendar events",
            ProviderId::YahooQuote => "Yahoo Finance quote",
            ProviderId::Finnhub => "Finnhub",
            ProviderId::YahooPage => "Yahoo Finance quote page",
        }
    }

    /// Whether the provider needs a configured API key.
    pub const fn requires_api_key(self) -> bool {
        matches!(self, ProviderId::Finnhub)
    }

    /// Whether rows arrive in no particular order and must be sorted by time.
    pub(crate) const fn unsorted(self) -> bool {
        !matches!(self, ProviderId::YahooQuote)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        ProviderId::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| format!("unknown provider: {s}"))
    }
}
