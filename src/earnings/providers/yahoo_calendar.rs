use super::{decode_calendar, yahoo_invalid_crumb, yahoo_rate_limited};
use crate::core::{EcClient, EcError, net};
use crate::earnings::model::FetchResult;
use crate::earnings::wire::CalendarPayload;

const MODULES: &str = "calendarEvents";

/// quoteSummary `calendarEvents` for one symbol.
///
/// A stale crumb is refreshed once; any other failure is returned as-is.
pub(crate) async fn fetch(client: &EcClient, symbol: &str) -> Result<FetchResult, EcError> {
    for attempt in 0..=1 {
        client.ensure_credentials().await?;

        let crumb = client
            .crumb()
            .await
            .ok_or_else(|| EcError::Auth("Crumb is not set".into()))?;

        let mut url = client.base_quote_api().join(symbol)?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("modules", MODULES);
            qp.append_pair("crumb", &crumb);
        }

        let resp = net::get_text(client, url, "application/json").await?;

        if yahoo_rate_limited(&resp) {
            return Ok(FetchResult::RateLimited);
        }
        if yahoo_invalid_crumb(&resp) && attempt == 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(symbol, "invalid crumb; refreshing session");
            client.clear_crumb().await;
            continue;
        }
        // Unknown symbols come back as 404, usually with a "Quote not found" envelope.
        if resp.status == 404 {
            let outcome = serde_json::from_str::<CalendarPayload>(&resp.body)
                .map(|p| decode_calendar(p, symbol, client.timezone()))
                .unwrap_or(FetchResult::Empty);
            return Ok(outcome);
        }
        if !resp.is_success() {
            return Err(resp.status_error());
        }

        let payload: CalendarPayload = serde_json::from_str(&resp.body)
            .map_err(|e| EcError::Data(format!("quoteSummary json parse: {e}")))?;
        return Ok(decode_calendar(payload, symbol, client.timezone()));
    }

    Err(EcError::Auth(
        "calendarEvents API call failed after refreshing the crumb".into(),
    ))
}
