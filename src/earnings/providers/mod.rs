//! One submodule per upstream. Each returns the raw event list in provider order
//! (or an early outcome such as `RateLimited`); the fetcher applies sorting and
//! the past-event policy afterwards.

mod finnhub;
mod yahoo_calendar;
mod yahoo_page;
mod yahoo_quote;

pub(crate) use finnhub::fetch as finnhub;
pub(crate) use yahoo_calendar::fetch as yahoo_calendar;
pub(crate) use yahoo_page::fetch as yahoo_page;
pub(crate) use yahoo_quote::fetch as yahoo_quote;

use chrono_tz::Tz;

use super::model::{EarningsEvent, EventTime, FetchResult};
use super::normalize::{self, LABEL_CALL, LABEL_ESTIMATE};
use super::wire::{CalendarEarningsNode, CalendarPayload, DateValue, SymbolSlot, V10Error};
use crate::core::net::RawResponse;

/// Epoch values past this are milliseconds, not seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Yahoo answers throttled requests with a 429 and a plain-text body, sometimes
/// with a 200 and the same text wrapped in an error object.
pub(super) fn yahoo_rate_limited(resp: &RawResponse) -> bool {
    resp.is_too_many_requests() || resp.body.contains("Too Many Requests")
}

pub(super) fn yahoo_invalid_crumb(resp: &RawResponse) -> bool {
    matches!(resp.status, 401 | 403) || resp.body.to_ascii_lowercase().contains("invalid crumb")
}

/// Maps a Yahoo `error` object to an outcome. Unknown symbols are not errors.
pub(super) fn yahoo_error_outcome(err: &V10Error) -> FetchResult {
    let desc = err.description.to_ascii_lowercase();
    let not_found = err.code.as_deref() == Some("Not Found")
        || desc.contains("not found")
        || desc.contains("no data found")
        || desc.contains("delisted");
    if not_found {
        FetchResult::Empty
    } else if desc.contains("too many requests") {
        FetchResult::RateLimited
    } else {
        FetchResult::ProviderError(format!("yahoo error: {}", err.description))
    }
}

pub(super) fn resolve_date(value: &DateValue, tz: Tz) -> Option<EventTime> {
    match value {
        DateValue::Raw(raw) => match (raw.raw, raw.fmt.as_deref()) {
            (Some(secs), _) => resolve_epoch(secs, tz),
            (None, Some(text)) => normalize::parse_text(text, tz),
            (None, None) => None,
        },
        DateValue::Epoch(secs) => resolve_epoch(*secs, tz),
        DateValue::Text(text) => normalize::parse_text(text, tz),
    }
}

fn resolve_epoch(value: i64, tz: Tz) -> Option<EventTime> {
    let secs = if value.abs() >= EPOCH_MILLIS_THRESHOLD {
        value / 1000
    } else {
        value
    };
    normalize::from_epoch(secs, tz)
}

/// Events from a `calendarEvents.earnings` node.
///
/// `earningsCallDate` is authoritative. Otherwise `earningsDate` is used, and it is
/// an estimate when Yahoo flags it so or, absent the flag, when it holds a range.
pub(super) fn calendar_events(node: CalendarEarningsNode, tz: Tz) -> Vec<EarningsEvent> {
    let resolve_all = |cells: Option<Vec<Option<DateValue>>>| -> Vec<EventTime> {
        cells
            .unwrap_or_default()
            .iter()
            .flatten()
            .filter_map(|c| resolve_date(c, tz))
            .collect()
    };

    let call_dates = resolve_all(node.earnings_call_date);
    let dates = resolve_all(node.earnings_date);
    let estimated = node
        .is_earnings_date_estimate
        .and_then(|b| b.value())
        .unwrap_or(dates.len() >= 2);

    let (confirmed, estimates) = match (call_dates.is_empty(), estimated) {
        (false, _) => (call_dates, Vec::new()),
        (true, true) => (Vec::new(), dates),
        (true, false) => (dates, Vec::new()),
    };
    normalize::confirmed_or_estimated(confirmed, estimates, LABEL_CALL, LABEL_ESTIMATE)
}

/// Decodes either calendar payload shape for `symbol`.
pub(super) fn decode_calendar(payload: CalendarPayload, symbol: &str, tz: Tz) -> FetchResult {
    let table = match payload {
        CalendarPayload::Envelope(env) => {
            if let Some(err) = env.quote_summary.error.as_ref() {
                return yahoo_error_outcome(err);
            }
            env.quote_summary.result.and_then(|mut v| v.pop())
        }
        CalendarPayload::BySymbol(mut map) => {
            let slot = match map.remove(symbol) {
                Some(slot) => Some(slot),
                // A single-entry mapping is keyed by Yahoo's canonical spelling.
                None if map.len() == 1 => map.into_values().next(),
                None => None,
            };
            match slot {
                Some(SymbolSlot::Table(t)) => Some(t),
                Some(SymbolSlot::Message(_msg)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(symbol, message = %_msg, "provider returned an error string");
                    return FetchResult::Empty;
                }
                None => None,
            }
        }
    };

    match table.and_then(|t| t.into_earnings()) {
        Some(node) => FetchResult::from_events(calendar_events(node, tz)),
        None => FetchResult::Empty,
    }
}
