use chrono::NaiveDate;
use earnings_cal::{Confidence, EarningsFetcher, EventTime, FetchResult, ProviderId};
use httpmock::Method::GET;

use crate::common::{client_for, fixture, setup_server};

fn at(y: i32, m: u32, d: u32, h: u32) -> EventTime {
    EventTime::DateTime(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap())
}

#[tokio::test]
async fn sveltekit_page_skips_other_caches_and_sorts_dates() {
    let server = setup_server();
    let page = server.mock(|when, then| {
        when.method(GET).path("/quote/NVDA").query_param("p", "NVDA");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(fixture("quote_html", "NVDA", "html"));
    });

    let client = client_for(&server).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .fetch("nvda", ProviderId::YahooPage)
        .await;

    page.assert();
    let events = result.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.confidence == Confidence::Confirmed));
    assert_eq!(events[0].timestamp, at(2025, 2, 26, 21));
    assert_eq!(events[1].timestamp, at(2025, 5, 28, 20));
}

#[tokio::test]
async fn legacy_store_literal_is_read() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/quote/FORTUM.HE");
        then.status(200)
            .header("content-type", "text/html")
            .body(fixture("quote_html", "FORTUM.HE", "html"));
    });

    let client = client_for(&server).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .fetch("FORTUM.HE", ProviderId::YahooPage)
        .await;

    let events = result.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].label, "Earnings Date (est.)");
    assert_eq!(events[0].confidence, Confidence::Estimated);
    assert_eq!(events[0].timestamp, at(2025, 5, 8, 5));
}

#[tokio::test]
async fn page_without_calendar_is_empty() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/quote/ACME");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><h1>ACME</h1></body></html>");
    });

    let client = client_for(&server).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .fetch("ACME", ProviderId::YahooPage)
        .await;
    assert_eq!(result, FetchResult::Empty);
}

#[tokio::test]
async fn missing_page_is_empty() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/quote/ZZZZ");
        then.status(404).body("<html>Not Found</html>");
    });

    let client = client_for(&server).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .fetch("ZZZZ", ProviderId::YahooPage)
        .await;
    assert_eq!(result, FetchResult::Empty);
}

#[tokio::test]
async fn throttled_page_is_rate_limited() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/quote/NVDA");
        then.status(429).body("Too Many Requests");
    });

    let client = client_for(&server).build().unwrap();
    let result = EarningsFetcher::new(&client)
        .fetch("NVDA", ProviderId::YahooPage)
        .await;
    assert_eq!(result, FetchResult::RateLimited);
}
