use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use url::form_urlencoded::byte_serialize;

use crate::earnings::{EarningsEvent, EventTime, ProviderId};

/// Google Calendar event-template endpoint.
const RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// `dates` wire format: basic ISO date and time, no separators.
const DATES_FMT: &str = "%Y%m%dT%H%M%S";

/// Location used when the caller has nothing better.
pub const DEFAULT_LOCATION: &str = "Online";

/// A ready-to-open calendar URL together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarLink {
    url: String,
    /// Ticker the event is about.
    pub ticker: String,
    /// Event label used in the title.
    pub label: String,
    /// Resolved start time.
    pub start: NaiveDateTime,
    /// `start` plus one hour.
    pub end: NaiveDateTime,
}

impl CalendarLink {
    /// The URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Consumes the link, returning the URL.
    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for CalendarLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for CalendarLink {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// Builds calendar deep-links.
///
/// The builder only carries presentation settings (base URL, data source named in
/// the description, default start time), so one instance can serve every event.
#[derive(Debug, Clone)]
pub struct CalendarLinkBuilder {
    base: String,
    source: String,
    default_start: NaiveTime,
    duration: Duration,
}

impl Default for CalendarLinkBuilder {
    fn default() -> Self {
        Self {
            base: RENDER_URL.to_string(),
            source: "Yahoo Finance".to_string(),
            default_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            duration: Duration::hours(1),
        }
    }
}

impl CalendarLinkBuilder {
    /// Creates a builder with the default endpoint, naming Yahoo Finance as the
    /// data source. Use [`for_provider`](Self::for_provider) for other providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose descriptions name `provider` as the data source.
    pub fn for_provider(provider: ProviderId) -> Self {
        Self::default().source(provider.source_name())
    }

    /// Data source named in the event description.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Override the endpoint (everything before `?`).
    #[must_use]
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Builds the link for one event.
    ///
    /// Title, description and location are form-urlencoded; `dates` contains only
    /// digits, `T` and `/` and is embedded as is.
    pub fn build(
        &self,
        ticker: &str,
        event_label: &str,
        start: EventTime,
        location_hint: &str,
    ) -> CalendarLink {
        let start_at = start.at_or(self.default_start);
        let end_at = start_at + self.duration;

        let title = format!("{event_label}: {ticker}");
        let details = format!(
            "Check investor relations page for {ticker}.\nData source: {}.",
            self.source
        );

        let url = format!(
            "{base}?action=TEMPLATE&text={text}&dates={s}/{e}&details={details}&location={location}",
            base = self.base,
            text = encode(&title),
            s = start_at.format(DATES_FMT),
            e = end_at.format(DATES_FMT),
            details = encode(&details),
            location = encode(location_hint),
        );

        CalendarLink {
            url,
            ticker: ticker.to_string(),
            label: event_label.to_string(),
            start: start_at,
            end: end_at,
        }
    }

    /// Builds one link per event, in order.
    pub fn build_all(
        &self,
        ticker: &str,
        events: &[EarningsEvent],
        location_hint: &str,
    ) -> Vec<CalendarLink> {
        events
            .iter()
            .map(|e| self.build(ticker, &e.label, e.timestamp, location_hint))
            .collect()
    }
}

fn encode(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}
