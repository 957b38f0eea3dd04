use super::{decode_calendar, yahoo_rate_limited};
use crate::core::{EcClient, EcError, net};
use crate::earnings::model::FetchResult;
use crate::earnings::scrape::extract_calendar;

/// Scrape the Yahoo quote HTML page and read the calendar data it embeds.
///
/// The request goes through the client's cookie store, so a session established
/// by earlier Yahoo calls is reused.
pub(crate) async fn fetch(client: &EcClient, symbol: &str) -> Result<FetchResult, EcError> {
    let mut url = client.base_quote().join(symbol)?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("p", symbol);
    }

    let resp = net::get_text(client, url, "text/html").await?;

    if yahoo_rate_limited(&resp) {
        return Ok(FetchResult::RateLimited);
    }
    if resp.status == 404 {
        return Ok(FetchResult::Empty);
    }
    if !resp.is_success() {
        return Err(resp.status_error());
    }

    match extract_calendar(&resp.body) {
        Some(payload) => Ok(decode_calendar(payload, symbol, client.timezone())),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(symbol, len = resp.body.len(), "quote page carries no calendar data");
            Ok(FetchResult::Empty)
        }
    }
}
