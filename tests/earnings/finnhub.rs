use chrono::NaiveDate;
use earnings_cal::{Confidence, EarningsFetcher, EventTime, FetchResult, ProviderId};
use httpmock::Method::GET;

use crate::common::{client_for, fixture, setup_server};

const KEY: &str = "c0ffee123abc";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn rows_are_sorted_ascending_with_session_labels() {
    let server = setup_server();
    let api = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/calendar/earnings")
            .query_param("symbol", "NVDA")
            .query_param("from", "2024-02-21")
            .query_param("to", "2026-02-20")
            .query_param("token", KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("finnhub", "NVDA", "json"));
    });

    let client = client_for(&server).api_key(KEY).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .as_of(day(2025, 2, 20))
        .fetch("NVDA", ProviderId::Finnhub)
        .await;

    api.assert();
    let events = result.events();
    let dates: Vec<EventTime> = events.iter().map(|e| e.timestamp).collect();
    assert_eq!(
        dates,
        vec![
            EventTime::Date(day(2024, 11, 20)),
            EventTime::Date(day(2025, 2, 26)),
            EventTime::Date(day(2025, 5, 28)),
        ]
    );
    assert_eq!(events[1].label, "Earnings Release (after close)");
    assert_eq!(events[1].confidence, Confidence::Confirmed);
    assert_eq!(events[2].label, "Earnings Release");
    assert_eq!(events[2].confidence, Confidence::Estimated);
}

#[tokio::test]
async fn include_past_false_keeps_upcoming_only() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/calendar/earnings");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("finnhub", "NVDA", "json"));
    });

    let client = client_for(&server).api_key(KEY).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .include_past(false)
        .as_of(day(2025, 2, 20))
        .fetch("NVDA", ProviderId::Finnhub)
        .await;

    assert_eq!(result.events().len(), 2);
    assert_eq!(result.events()[0].timestamp, EventTime::Date(day(2025, 2, 26)));
}

#[tokio::test]
async fn missing_or_placeholder_key_never_calls_out() {
    let server = setup_server();
    let api = server.mock(|when, then| {
        when.method(GET).path("/api/v1/calendar/earnings");
        then.status(200).body(r#"{"earningsCalendar":[]}"#);
    });

    let unset = client_for(&server).build().unwrap();
    let placeholder = client_for(&server).api_key("YOUR_API_KEY").build().unwrap();
    assert!(!placeholder.has_api_key());

    for client in [unset, placeholder] {
        let result = EarningsFetcher::new(&client)
            .fetch("NVDA", ProviderId::Finnhub)
            .await;
        assert_eq!(result, FetchResult::MissingCredentials);
    }
    api.assert_hits(0);
}

#[tokio::test]
async fn empty_calendar_is_empty() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/calendar/earnings");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"earningsCalendar":[]}"#);
    });

    let client = client_for(&server).api_key(KEY).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .fetch("ZZZZ", ProviderId::Finnhub)
        .await;
    assert_eq!(result, FetchResult::Empty);
}

#[tokio::test]
async fn quota_exhaustion_is_rate_limited() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/calendar/earnings")
            .query_param("symbol", "NVDA");
        then.status(429)
            .header("content-type", "application/json")
            .body(r#"{"error":"API limit reached. Please try again later. Remaining Limit: 0"}"#);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/calendar/earnings")
            .query_param("symbol", "AAPL");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"error":"API limit reached. Please try again later. Remaining Limit: 0"}"#);
    });

    let client = client_for(&server).api_key(KEY).build().unwrap();
    let fetcher = EarningsFetcher::new(&client);
    assert_eq!(fetcher.fetch("NVDA", ProviderId::Finnhub).await, FetchResult::RateLimited);
    assert_eq!(fetcher.fetch("AAPL", ProviderId::Finnhub).await, FetchResult::RateLimited);
}

#[tokio::test]
async fn rejected_key_is_a_provider_error() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/calendar/earnings");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"error":"Invalid API key"}"#);
    });

    let client = client_for(&server).api_key("revoked-key").build().unwrap();
    match EarningsFetcher::new(&client).fetch("NVDA", ProviderId::Finnhub).await {
        FetchResult::ProviderError(msg) => {
            assert!(msg.contains("Invalid API key"), "{msg}");
            assert!(!msg.contains("revoked-key"), "key leaked: {msg}");
        }
        other => panic!("expected ProviderError, got {other:?}"),
    }
}
