use url::Url;

use crate::core::{EcClient, EcError};

/// Status and body of a single provider request, read fully as text.
///
/// Providers inspect the pair themselves because several of them signal
/// "rate limited" or "unknown symbol" through a non-2xx status with a body.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    pub(crate) url: Url,
    pub(crate) body: String,
}

impl RawResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) fn is_too_many_requests(&self) -> bool {
        self.status == 429
    }

    /// Turns an unexpected status into an error carrying the request URL.
    pub(crate) fn status_error(&self) -> EcError {
        EcError::Status {
            status: self.status,
            url: redact(&self.url),
        }
    }
}

/// Issue one GET and read the body as text.
pub(crate) async fn get_text(
    client: &EcClient,
    url: Url,
    accept: &str,
) -> Result<RawResponse, EcError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(url = %redact(&url), "provider request");

    let resp = client
        .http()
        .get(url.clone())
        .header("accept", accept)
        .send()
        .await?;
    let status = resp.status().as_u16();
    let body = resp.text().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(status, len = body.len(), "provider response");

    Ok(RawResponse { status, url, body })
}

/// Drop secrets (`token`, `crumb`) from a URL before it is logged or reported.
pub(crate) fn redact(url: &Url) -> String {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" || k == "crumb" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return out.to_string();
    }
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}
