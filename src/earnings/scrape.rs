//! Locating the `calendarEvents` data embedded in a Yahoo quote page.
//!
//! Two layouts are recognised, tried in order:
//! 1. JSON `<script>` blocks whose payload (directly, or as an escaped `body`
//!    string as in SvelteKit fetch caches) is a quoteSummary envelope.
//! 2. A bare `"calendarEvents": { ... }` object literal anywhere in the page.

use serde_json::Value;

use super::wire::{CalendarPayload, CalendarTable, V10Envelope, V10QuoteSummary};

const CALENDAR_KEY: &str = "\"calendarEvents\"";

/// The calendar payload embedded in `html`, if any.
pub(crate) fn extract_calendar(html: &str) -> Option<CalendarPayload> {
    from_json_scripts(html).or_else(|| from_object_literal(html))
}

fn from_json_scripts(html: &str) -> Option<CalendarPayload> {
    for (_attrs, inner) in iter_json_scripts(html) {
        let Some(value) = parse_jsonish(inner) else {
            continue;
        };
        let candidate = match value.get("body").and_then(Value::as_str) {
            Some(body) => match parse_jsonish(body) {
                Some(v) => v,
                None => continue,
            },
            None => value,
        };
        // Pages embed several quoteSummary fetch caches (price, summaryDetail, ...).
        if !carries_calendar(&candidate) {
            continue;
        }
        if let Ok(env) = serde_json::from_value::<V10Envelope>(candidate) {
            #[cfg(feature = "tracing")]
            tracing::debug!(attrs = %truncate(_attrs, 120), "calendar found in json script");
            return Some(CalendarPayload::Envelope(env));
        }
    }
    None
}

fn carries_calendar(envelope: &Value) -> bool {
    envelope
        .pointer("/quoteSummary/result")
        .and_then(Value::as_array)
        .is_some_and(|tables| tables.iter().any(|t| t.get("calendarEvents").is_some()))
}

fn from_object_literal(html: &str) -> Option<CalendarPayload> {
    let pos = html.find(CALENDAR_KEY)?;
    let after = pos + CALENDAR_KEY.len();
    let start = after + html[after..].find('{')?;
    let end = find_matching_brace(html, start)?;
    let table = CalendarTable {
        calendar_events: Some(serde_json::from_str(&html[start..=end]).ok()?),
        earnings: None,
    };
    Some(CalendarPayload::Envelope(V10Envelope {
        quote_summary: V10QuoteSummary {
            result: Some(vec![table]),
            error: None,
        },
    }))
}

/// `(opening tag, inner text)` of every `<script type="application/json">` block.
pub(crate) fn iter_json_scripts(html: &str) -> Vec<(&str, &str)> {
    let mut res = Vec::new();
    let mut pos = 0usize;

    while let Some(si) = html[pos..].find("<script") {
        let si = pos + si;
        let open_end = match html[si..].find('>') {
            Some(x) => si + x,
            None => break,
        };
        let tag_open = &html[si..=open_end];

        let close = match html[open_end + 1..].find("</script>") {
            Some(x) => open_end + 1 + x,
            None => break,
        };
        if tag_open.contains("type=\"application/json\"") {
            res.push((tag_open, &html[open_end + 1..close]));
        }
        pos = close + "</script>".len();
    }
    res
}

/// Index of the `}` closing the object that opens at `start`, skipping braces inside strings.
pub(crate) fn find_matching_brace(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(start).copied()? != b'{' {
        return None;
    }

    let mut depth = 0usize;
    let mut in_str = false;
    let mut j = start;

    while j < bytes.len() {
        let c = bytes[j];

        if in_str {
            if c == b'\\' {
                j += 2;
                continue;
            } else if c == b'"' {
                in_str = false;
            }
            j += 1;
            continue;
        }

        match c {
            b'"' => in_str = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

fn parse_jsonish(s: &str) -> Option<Value> {
    let t = s.trim();
    if t.starts_with('{') || t.starts_with('[') {
        serde_json::from_str::<Value>(t).ok()
    } else {
        None
    }
}

#[cfg(feature = "tracing")]
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
