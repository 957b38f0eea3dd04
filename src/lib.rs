//! earnings-cal: upcoming earnings dates as calendar deep-links.
//!
//! Fetch a ticker's earnings dates from one of several providers with
//! [`EarningsFetcher`], optionally memoized through [`CachedFetcher`], then turn
//! each [`EarningsEvent`] into a Google Calendar link with [`CalendarLinkBuilder`].
//!
//! ```no_run
//! # use earnings_cal::{CalendarLinkBuilder, EcClient, EarningsFetcher, ProviderId};
//! # #[tokio::main]
//! # async fn main() -> Result<(), earnings_cal::EcError> {
//! let client = EcClient::builder()
//!     .timezone(chrono_tz::Europe::Helsinki)
//!     .build()?;
//! let result = EarningsFetcher::new(&client)
//!     .fetch("NVDA", ProviderId::YahooCalendar)
//!     .await;
//!
//! let links = CalendarLinkBuilder::for_provider(ProviderId::YahooCalendar);
//! for link in links.build_all("NVDA", result.events(), "Online / Helsinki") {
//!     println!("{} {}", link.start, link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod calendar;
pub mod core;
pub mod earnings;

pub use cache::{CacheMode, CachedFetcher};
pub use calendar::{CalendarLink, CalendarLinkBuilder};
pub use core::{ApiKey, EcClient, EcClientBuilder, EcError};
pub use earnings::{
    Confidence, EarningsEvent, EarningsFetcher, EarningsSource, EventTime, FetchResult, ProviderId,
    normalize_ticker,
};
