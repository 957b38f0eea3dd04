//! Raw provider payloads. Nothing here leaves the `earnings` module; decoders
//! turn these into [`EarningsEvent`](super::EarningsEvent) lists.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::wire::{RawBool, RawDate};

/* ---------------- Yahoo quoteSummary (calendarEvents) ---------------- */

/// The two shapes a calendar payload arrives in: the quoteSummary envelope, or a
/// mapping keyed by ticker whose value is either the calendar table or an error string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum CalendarPayload {
    Envelope(V10Envelope),
    BySymbol(HashMap<String, SymbolSlot>),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum SymbolSlot {
    Table(CalendarTable),
    Message(String),
}

#[derive(Deserialize, Debug)]
pub(crate) struct V10Envelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: V10QuoteSummary,
}

#[derive(Deserialize, Debug)]
pub(crate) struct V10QuoteSummary {
    pub(crate) result: Option<Vec<CalendarTable>>,
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct V10Error {
    #[serde(default)]
    pub(crate) code: Option<String>,
    #[serde(default)]
    pub(crate) description: String,
}

/// A quoteSummary result carrying the `calendarEvents` module. The module may also
/// be handed over unwrapped (mapping shape, page scrape), hence the flattened fallback.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct CalendarTable {
    #[serde(rename = "calendarEvents")]
    pub(crate) calendar_events: Option<CalendarEventsNode>,
    #[serde(default)]
    pub(crate) earnings: Option<CalendarEarningsNode>,
}

impl CalendarTable {
    pub(crate) fn into_earnings(self) -> Option<CalendarEarningsNode> {
        self.calendar_events
            .and_then(|ce| ce.earnings)
            .or(self.earnings)
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct CalendarEventsNode {
    pub(crate) earnings: Option<CalendarEarningsNode>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct CalendarEarningsNode {
    #[serde(rename = "earningsCallDate", default)]
    pub(crate) earnings_call_date: Option<Vec<Option<DateValue>>>,
    #[serde(rename = "earningsDate", default)]
    pub(crate) earnings_date: Option<Vec<Option<DateValue>>>,
    #[serde(rename = "isEarningsDateEstimate", default)]
    pub(crate) is_earnings_date_estimate: Option<RawBool>,
}

/// A single date cell: Yahoo's `{raw, fmt}` wrapper, a bare epoch, or a date string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub(crate) enum DateValue {
    Raw(RawDate),
    Epoch(i64),
    Text(String),
}

/* ---------------- Yahoo v7 quote ---------------- */

#[derive(Deserialize, Debug)]
pub(crate) struct V7Envelope {
    #[serde(rename = "quoteResponse")]
    pub(crate) quote_response: Option<V7QuoteResponse>,
    #[serde(default)]
    pub(crate) finance: Option<V7Finance>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct V7QuoteResponse {
    pub(crate) result: Option<Vec<V7QuoteNode>>,
    #[allow(dead_code)]
    pub(crate) error: Option<serde_json::Value>,
}

/// `{"finance":{"error":{...}}}`, returned instead of `quoteResponse` on auth failures.
#[derive(Deserialize, Debug)]
pub(crate) struct V7Finance {
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct V7QuoteNode {
    #[serde(default)]
    pub(crate) symbol: Option<String>,
    #[serde(rename = "earningsTimestamp", default)]
    pub(crate) earnings_timestamp: Option<i64>,
    #[serde(rename = "earningsTimestampStart", default)]
    pub(crate) earnings_timestamp_start: Option<i64>,
    #[serde(rename = "earningsTimestampEnd", default)]
    pub(crate) earnings_timestamp_end: Option<i64>,
}

/* ---------------- Finnhub ---------------- */

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum FinnhubPayload {
    // Must come first: every object would otherwise match `Calendar`.
    Error { error: String },
    Calendar(FinnhubCalendar),
}

#[derive(Deserialize, Debug)]
pub(crate) struct FinnhubCalendar {
    #[serde(rename = "earningsCalendar", default)]
    pub(crate) earnings_calendar: Vec<FinnhubRow>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct FinnhubRow {
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default)]
    pub(crate) hour: Option<String>,
    #[serde(default)]
    pub(crate) symbol: Option<String>,
}
