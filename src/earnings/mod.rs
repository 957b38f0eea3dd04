//! Earnings-date retrieval and normalization.
//!
//! [`EarningsFetcher`] performs exactly one provider request per call and folds
//! every outcome, failures included, into a [`FetchResult`].

mod model;
mod normalize;
mod providers;
mod report;
mod scrape;
mod wire;

pub use model::{Confidence, EarningsEvent, EventTime, FetchResult, ProviderId};

use std::future::Future;
use std::pin::Pin;

use chrono::{NaiveDate, Utc};

use crate::core::{EcClient, EcError};
use normalize::Window;

/// Anything that can answer "earnings dates for this ticker from this provider".
///
/// Implemented by [`EarningsFetcher`] and by [`CachedFetcher`](crate::CachedFetcher),
/// which wraps another source.
pub trait EarningsSource: Send + Sync {
    /// Fetches and normalizes earnings events for `ticker`.
    fn fetch_earnings<'a>(
        &'a self,
        ticker: &'a str,
        provider: ProviderId,
    ) -> Pin<Box<dyn Future<Output = FetchResult> + Send + 'a>>;
}

/// Fetches earnings dates from a chosen provider.
///
/// # Example
///
/// ```no_run
/// # use earnings_cal::{EcClient, EarningsFetcher, FetchResult, ProviderId};
/// # #[tokio::main]
/// # async fn main() {
/// let client = EcClient::default();
/// let fetcher = EarningsFetcher::new(&client).include_past(false);
///
/// match fetcher.fetch("nvda", ProviderId::YahooCalendar).await {
///     FetchResult::Events(events) => {
///         for e in events {
///             println!("{} {} {:?}", e.timestamp, e.label, e.confidence);
///         }
///     }
///     other => println!("{}", other.hint("NVDA")),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EarningsFetcher {
    client: EcClient,
    include_past: bool,
    as_of: Option<NaiveDate>,
}

impl EarningsFetcher {
    /// Creates a fetcher that keeps past events.
    pub fn new(client: &EcClient) -> Self {
        Self {
            client: client.clone(),
            include_past: true,
            as_of: None,
        }
    }

    /// Whether events older than yesterday are returned. Default: `true`.
    #[must_use]
    pub const fn include_past(mut self, yes: bool) -> Self {
        self.include_past = yes;
        self
    }

    /// Pins "today" instead of reading the clock in the client's timezone.
    #[must_use]
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Fetches earnings events for `ticker` from `provider`.
    ///
    /// The ticker is trimmed and upper-cased. This never fails: network, status and
    /// parse errors become [`FetchResult::ProviderError`] or
    /// [`FetchResult::MalformedPayload`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(provider = %provider)))]
    pub async fn fetch(&self, ticker: &str, provider: ProviderId) -> FetchResult {
        let symbol = normalize_ticker(ticker);
        if symbol.is_empty() {
            return FetchResult::Empty;
        }
        if provider.requires_api_key() && !self.client.has_api_key() {
            #[cfg(feature = "tracing")]
            tracing::warn!(%provider, "api key not configured; skipping request");
            return FetchResult::MissingCredentials;
        }

        let window = Window {
            include_past: self.include_past,
            as_of: self.as_of.unwrap_or_else(|| {
                Utc::now().with_timezone(&self.client.timezone()).date_naive()
            }),
        };

        let raw = match provider {
            ProviderId::YahooCalendar => providers::yahoo_calendar(&self.client, &symbol).await,
            ProviderId::YahooQuote => providers::yahoo_quote(&self.client, &symbol).await,
            ProviderId::Finnhub => providers::finnhub(&self.client, &symbol, window.as_of).await,
            ProviderId::YahooPage => providers::yahoo_page(&self.client, &symbol).await,
        };

        let result = match raw {
            Ok(FetchResult::Events(events)) => normalize::finish(events, provider, window),
            Ok(other) => other,
            Err(e) => fold_error(e),
        };

        #[cfg(feature = "tracing")]
        match &result {
            FetchResult::Events(events) => tracing::debug!(count = events.len(), "earnings events"),
            other if other.is_error() => tracing::warn!(?other, "earnings fetch failed"),
            other => tracing::debug!(?other, "no earnings events"),
        }

        result
    }
}

impl EarningsSource for EarningsFetcher {
    fn fetch_earnings<'a>(
        &'a self,
        ticker: &'a str,
        provider: ProviderId,
    ) -> Pin<Box<dyn Future<Output = FetchResult> + Send + 'a>> {
        Box::pin(self.fetch(ticker, provider))
    }
}

/// Trims surrounding whitespace and upper-cases a user-entered ticker.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn fold_error(e: EcError) -> FetchResult {
    match e {
        EcError::Status { status: 429, .. } => FetchResult::RateLimited,
        EcError::Data(msg) => FetchResult::MalformedPayload(msg),
        other => FetchResult::ProviderError(other.to_string()),
    }
}
