use earnings_cal::{CacheMode, CachedFetcher, EarningsFetcher, FetchResult, ProviderId};
use httpmock::Method::GET;

use crate::common::{client_for, fixture, setup_server};

#[tokio::test]
async fn repeated_lookups_hit_the_provider_once() {
    let server = setup_server();
    let quote = server.mock(|when, then| {
        when.method(GET)
            .path("/v7/finance/quote")
            .query_param("symbols", "NVDA");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("quote_v7", "NVDA", "json"));
    });

    let client = client_for(&server).build().unwrap();
    let cached = CachedFetcher::new(EarningsFetcher::new(&client));

    let first = cached.fetch("NVDA", ProviderId::YahooQuote).await;
    let second = cached.fetch("nvda ", ProviderId::YahooQuote).await;

    quote.assert_hits(1);
    assert_eq!(first, second);
    assert_eq!(first.events().len(), 1);
}

#[tokio::test]
async fn refresh_mode_always_refetches() {
    let server = setup_server();
    let quote = server.mock(|when, then| {
        when.method(GET).path("/v7/finance/quote");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("quote_v7", "NVDA", "json"));
    });

    let client = client_for(&server).build().unwrap();
    let cached = CachedFetcher::new(EarningsFetcher::new(&client)).cache_mode(CacheMode::Refresh);

    cached.fetch("NVDA", ProviderId::YahooQuote).await;
    cached.fetch("NVDA", ProviderId::YahooQuote).await;
    quote.assert_hits(2);
}

#[tokio::test]
async fn rate_limits_are_retried_on_the_next_call() {
    let server = setup_server();
    let quote = server.mock(|when, then| {
        when.method(GET).path("/v7/finance/quote");
        then.status(429).body("Too Many Requests");
    });

    let client = client_for(&server).build().unwrap();
    let cached = CachedFetcher::new(EarningsFetcher::new(&client));

    assert_eq!(cached.fetch("NVDA", ProviderId::YahooQuote).await, FetchResult::RateLimited);
    assert_eq!(cached.fetch("NVDA", ProviderId::YahooQuote).await, FetchResult::RateLimited);
    quote.assert_hits(2);
}
