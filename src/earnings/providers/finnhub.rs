use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use crate::core::{EcClient, EcError, net};
use crate::earnings::model::{Confidence, EarningsEvent, FetchResult};
use crate::earnings::normalize;
use crate::earnings::wire::{FinnhubPayload, FinnhubRow};

/// Days on either side of the as-of date covered by one request.
const WINDOW_DAYS: i64 = 365;

/// Finnhub earnings calendar for one symbol. Callers check the key first; a
/// missing key here is still reported without touching the network.
pub(crate) async fn fetch(
    client: &EcClient,
    symbol: &str,
    as_of: NaiveDate,
) -> Result<FetchResult, EcError> {
    let Some(key) = client.api_key() else {
        return Ok(FetchResult::MissingCredentials);
    };

    let mut url = client.base_finnhub().join("calendar/earnings")?;
    {
        let from = as_of - Duration::days(WINDOW_DAYS);
        let to = as_of + Duration::days(WINDOW_DAYS);
        let mut qp = url.query_pairs_mut();
        qp.append_pair("symbol", symbol);
        qp.append_pair("from", &from.format("%Y-%m-%d").to_string());
        qp.append_pair("to", &to.format("%Y-%m-%d").to_string());
        qp.append_pair("token", key.expose());
    }

    let resp = net::get_text(client, url, "application/json").await?;

    if resp.is_too_many_requests() {
        return Ok(FetchResult::RateLimited);
    }

    let cal = match serde_json::from_str::<FinnhubPayload>(&resp.body) {
        Ok(FinnhubPayload::Error { error }) => {
            if error.to_ascii_lowercase().contains("limit") {
                return Ok(FetchResult::RateLimited);
            }
            #[cfg(feature = "tracing")]
            tracing::warn!(symbol, status = resp.status, %error, "finnhub rejected the request");
            return Ok(FetchResult::ProviderError(format!("finnhub error: {error}")));
        }
        _ if !resp.is_success() => return Err(resp.status_error()),
        Ok(FinnhubPayload::Calendar(cal)) => cal,
        Err(e) => return Err(EcError::Data(format!("finnhub json parse: {e}"))),
    };

    let tz = client.timezone();
    let events = cal
        .earnings_calendar
        .iter()
        .filter(|row| {
            row.symbol
                .as_deref()
                .is_none_or(|s| s.eq_ignore_ascii_case(symbol))
        })
        .filter_map(|row| row_event(row, tz))
        .collect();
    Ok(FetchResult::from_events(events))
}

/// One calendar row. Finnhub publishes a session hint (`bmo`, `amc`, `dmh`) once
/// the company has scheduled the release; rows without one are projections.
fn row_event(row: &FinnhubRow, tz: Tz) -> Option<EarningsEvent> {
    let when = normalize::parse_text(row.date.as_deref()?, tz)?;
    let hour = row.hour.as_deref().map(str::trim).unwrap_or_default();
    let (label, confidence) = match hour.to_ascii_lowercase().as_str() {
        "bmo" => ("Earnings Release (before open)", Confidence::Confirmed),
        "amc" => ("Earnings Release (after close)", Confidence::Confirmed),
        "dmh" => ("Earnings Release (during market)", Confidence::Confirmed),
        _ => ("Earnings Release", Confidence::Estimated),
    };
    Some(EarningsEvent::new(label, when, confidence))
}
