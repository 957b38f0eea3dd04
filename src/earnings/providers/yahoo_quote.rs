use chrono_tz::Tz;

use super::{resolve_epoch, yahoo_error_outcome, yahoo_rate_limited};
use crate::core::net::{self, RawResponse};
use crate::core::{EcClient, EcError};
use crate::earnings::model::{EarningsEvent, FetchResult};
use crate::earnings::normalize::{self, LABEL_CALL, LABEL_ESTIMATE};
use crate::earnings::wire::{V7Envelope, V7QuoteNode};

/// v7 quote for one symbol: `earningsTimestamp`, else the estimated
/// `earningsTimestampStart`..`earningsTimestampEnd` window.
pub(crate) async fn fetch(client: &EcClient, symbol: &str) -> Result<FetchResult, EcError> {
    async fn attempt(
        client: &EcClient,
        symbol: &str,
        crumb: Option<&str>,
    ) -> Result<RawResponse, EcError> {
        let mut url = client.base_quote_v7().clone();
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("symbols", symbol);
            if let Some(c) = crumb {
                qp.append_pair("crumb", c);
            }
        }
        net::get_text(client, url, "application/json").await
    }

    // First attempt, without a crumb.
    let mut resp = attempt(client, symbol, None).await?;

    if resp.status == 401 || resp.status == 403 {
        #[cfg(feature = "tracing")]
        tracing::debug!(symbol, status = resp.status, "v7 quote wants a crumb");
        client.ensure_credentials().await?;
        let crumb = client
            .crumb()
            .await
            .ok_or_else(|| EcError::Auth("Crumb is not set after ensuring credentials".into()))?;
        resp = attempt(client, symbol, Some(&crumb)).await?;
    }

    if yahoo_rate_limited(&resp) {
        return Ok(FetchResult::RateLimited);
    }
    if resp.status == 404 {
        return Ok(FetchResult::Empty);
    }
    if !resp.is_success() {
        return Err(resp.status_error());
    }

    let env: V7Envelope = serde_json::from_str(&resp.body)
        .map_err(|e| EcError::Data(format!("v7 quote json parse: {e}")))?;

    if let Some(err) = env.finance.and_then(|f| f.error) {
        return Ok(yahoo_error_outcome(&err));
    }

    let node = env
        .quote_response
        .ok_or_else(|| EcError::Data("v7 quote: missing quoteResponse".into()))?
        .result
        .unwrap_or_default()
        .into_iter()
        .find(|n| {
            n.symbol
                .as_deref()
                .is_none_or(|s| s.eq_ignore_ascii_case(symbol))
        });

    Ok(match node {
        Some(node) => FetchResult::from_events(quote_events(&node, client.timezone())),
        None => FetchResult::Empty,
    })
}

fn quote_events(node: &V7QuoteNode, tz: Tz) -> Vec<EarningsEvent> {
    let confirmed = node
        .earnings_timestamp
        .and_then(|s| resolve_epoch(s, tz))
        .into_iter()
        .collect();
    let estimated = [node.earnings_timestamp_start, node.earnings_timestamp_end]
        .into_iter()
        .flatten()
        .filter_map(|s| resolve_epoch(s, tz))
        .collect();
    normalize::confirmed_or_estimated(confirmed, estimated, LABEL_CALL, LABEL_ESTIMATE)
}
