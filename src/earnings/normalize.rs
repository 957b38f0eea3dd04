//! Provider-independent steps shared by every payload decoder: turning raw date
//! values into [`EventTime`], choosing between confirmed and estimated fields,
//! and the final ordering/filtering pass.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use super::model::{Confidence, EarningsEvent, EventTime, FetchResult, ProviderId};

pub(crate) const LABEL_CALL: &str = "Earnings Call";
pub(crate) const LABEL_ESTIMATE: &str = "Earnings Date (est.)";

/// Epoch seconds rendered as wall-clock time in `tz`.
pub(crate) fn from_epoch(secs: i64, tz: Tz) -> Option<EventTime> {
    let utc = DateTime::from_timestamp(secs, 0)?;
    Some(EventTime::DateTime(utc.with_timezone(&tz).naive_local()))
}

/// Parses the textual date forms providers use: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`,
/// `YYYY-MM-DDTHH:MM:SS`, and RFC 3339 with an offset (converted into `tz`).
pub(crate) fn parse_text(raw: &str, tz: Tz) -> Option<EventTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(EventTime::Date(d));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(EventTime::DateTime(dt));
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| EventTime::DateTime(dt.with_timezone(&tz).naive_local()))
}

/// Builds events from the confirmed field when it resolved to anything, otherwise
/// from the estimated field. Unresolvable values were already dropped by the caller.
pub(crate) fn confirmed_or_estimated(
    confirmed: Vec<EventTime>,
    estimated: Vec<EventTime>,
    confirmed_label: &str,
    estimated_label: &str,
) -> Vec<EarningsEvent> {
    if !confirmed.is_empty() {
        return confirmed
            .into_iter()
            .map(|t| EarningsEvent::new(confirmed_label, t, Confidence::Confirmed))
            .collect();
    }
    let mut seen = Vec::with_capacity(estimated.len());
    for t in estimated {
        if !seen.contains(&t) {
            seen.push(t);
        }
    }
    seen.into_iter()
        .map(|t| EarningsEvent::new(estimated_label, t, Confidence::Estimated))
        .collect()
}

/// Which events survive the final pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Window {
    pub(crate) include_past: bool,
    pub(crate) as_of: NaiveDate,
}

impl Window {
    /// Past events are kept back to the day before `as_of`.
    fn keeps(&self, t: &EventTime) -> bool {
        self.include_past || t.date() >= self.as_of - Duration::days(1)
    }
}

/// Sorts rows from unordered providers and applies the past-event policy.
pub(crate) fn finish(
    mut events: Vec<EarningsEvent>,
    provider: ProviderId,
    window: Window,
) -> FetchResult {
    if provider.unsorted() {
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }
    events.retain(|e| window.keeps(&e.timestamp));
    FetchResult::from_events(events)
}
