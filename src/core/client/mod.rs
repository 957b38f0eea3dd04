//! Public client surface + builder.
//! Internals are split into `auth` (cookie/crumb) and `constants` (UA + defaults).

mod auth;
mod constants;

use crate::core::EcError;
use crate::core::config::{API_KEY_ENV, ApiKey, TIMEZONE_ENV};
use chrono_tz::Tz;
use constants::{
    DEFAULT_BASE_FINNHUB, DEFAULT_BASE_QUOTE, DEFAULT_BASE_QUOTE_API, DEFAULT_BASE_QUOTE_V7,
    DEFAULT_COOKIE_URL, DEFAULT_CRUMB_URL, USER_AGENT,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Debug, Default)]
struct SessionState {
    cookie: Option<String>,
    crumb: Option<String>,
}

/// Configured HTTP client shared by every provider.
///
/// Cloning is cheap; clones share the connection pool and the Yahoo session.
#[derive(Debug, Clone)]
pub struct EcClient {
    http: Client,
    base_quote: Url,
    base_quote_api: Url,
    base_quote_v7: Url,
    base_finnhub: Url,
    cookie_url: Url,
    crumb_url: Url,

    timezone: Tz,
    api_key: Option<ApiKey>,

    state: Arc<RwLock<SessionState>>,
    credential_fetch_lock: Arc<Mutex<()>>,
}

impl Default for EcClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl EcClient {
    /// Create a new builder.
    pub fn builder() -> EcClientBuilder {
        EcClientBuilder::default()
    }

    /// Timezone that provider epoch timestamps are rendered in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Whether a usable (non-placeholder) provider API key was configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_quote(&self) -> &Url {
        &self.base_quote
    }
    pub(crate) fn base_quote_api(&self) -> &Url {
        &self.base_quote_api
    }
    pub(crate) fn base_quote_v7(&self) -> &Url {
        &self.base_quote_v7
    }
    pub(crate) fn base_finnhub(&self) -> &Url {
        &self.base_finnhub
    }
    pub(crate) fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct EcClientBuilder {
    user_agent: Option<String>,
    base_quote: Option<Url>,
    base_quote_api: Option<Url>,
    base_quote_v7: Option<Url>,
    base_finnhub: Option<Url>,
    cookie_url: Option<Url>,
    crumb_url: Option<Url>,

    timezone: Option<Tz>,
    api_key: Option<ApiKey>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl EcClientBuilder {
    /// Seed the builder from the process environment.
    ///
    /// Reads the Finnhub key from `FINNHUB_API_KEY` and the display timezone from
    /// `EARNINGS_CAL_TZ` (an IANA name such as `Europe/Helsinki`). Unset, empty,
    /// placeholder or unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut b = Self::default();
        if let Ok(raw) = std::env::var(API_KEY_ENV) {
            b.api_key = ApiKey::parse(raw);
        }
        if let Ok(raw) = std::env::var(TIMEZONE_ENV) {
            match raw.trim().parse::<Tz>() {
                Ok(tz) => b.timezone = Some(tz),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(value = %raw, error = %_e, "ignoring unknown timezone");
                }
            }
        }
        b
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quotes HTML base (e.g., `https://finance.yahoo.com/quote/`).
    pub fn base_quote(mut self, url: Url) -> Self {
        self.base_quote = Some(url);
        self
    }

    /// Override the quoteSummary API base (e.g., `https://query1.finance.yahoo.com/v10/finance/quoteSummary/`).
    pub fn base_quote_api(mut self, url: Url) -> Self {
        self.base_quote_api = Some(url);
        self
    }

    /// Override the v7 quote endpoint (e.g., `https://query1.finance.yahoo.com/v7/finance/quote`).
    pub fn base_quote_v7(mut self, url: Url) -> Self {
        self.base_quote_v7 = Some(url);
        self
    }

    /// Override the Finnhub API root (e.g., `https://finnhub.io/api/v1/`).
    pub fn base_finnhub(mut self, url: Url) -> Self {
        self.base_finnhub = Some(url);
        self
    }

    /// Override the cookie bootstrap URL.
    pub fn cookie_url(mut self, url: Url) -> Self {
        self.cookie_url = Some(url);
        self
    }

    /// Override the crumb URL.
    pub fn crumb_url(mut self, url: Url) -> Self {
        self.crumb_url = Some(url);
        self
    }

    /// Timezone used to turn provider epoch timestamps into wall-clock times. Default: UTC.
    pub fn timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Configure the Finnhub API key. Empty or placeholder values leave the key unset.
    pub fn api_key(mut self, key: impl AsRef<str>) -> Self {
        self.api_key = ApiKey::parse(key);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<EcClient, EcError> {
        let base_quote = self.base_quote.unwrap_or(Url::parse(DEFAULT_BASE_QUOTE)?);
        let base_quote_api = self
            .base_quote_api
            .unwrap_or(Url::parse(DEFAULT_BASE_QUOTE_API)?);
        let base_quote_v7 = self
            .base_quote_v7
            .unwrap_or(Url::parse(DEFAULT_BASE_QUOTE_V7)?);
        let base_finnhub = self
            .base_finnhub
            .unwrap_or(Url::parse(DEFAULT_BASE_FINNHUB)?);
        let cookie_url = self.cookie_url.unwrap_or(Url::parse(DEFAULT_COOKIE_URL)?);
        let crumb_url = self.crumb_url.unwrap_or(Url::parse(DEFAULT_CRUMB_URL)?);

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        #[cfg(feature = "tracing")]
        if self.api_key.is_none() {
            tracing::debug!("no provider api key configured; keyed providers will report missing credentials");
        }

        Ok(EcClient {
            http,
            base_quote,
            base_quote_api,
            base_quote_v7,
            base_finnhub,
            cookie_url,
            crumb_url,
            timezone: self.timezone.unwrap_or(Tz::UTC),
            api_key: self.api_key,
            state: Arc::new(RwLock::new(SessionState::default())),
            credential_fetch_lock: Arc::new(Mutex::new(())),
        })
    }
}
