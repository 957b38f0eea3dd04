#![allow(dead_code)]

use earnings_cal::EcClientBuilder;
use httpmock::{Method::GET, Mock, MockServer};
use std::{fs, path::Path};
use url::Url;

pub const CRUMB: &str = "crumb-value";

pub fn setup_server() -> MockServer {
    init_tracing();
    MockServer::start()
}

/// Routes crate logs to the test writer; filter with `RUST_LOG`.
pub fn init_tracing() {
    #[cfg(feature = "tracing-subscriber")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A client builder with every upstream pointed at `server`.
pub fn client_for(server: &MockServer) -> EcClientBuilder {
    let url = |path: &str| Url::parse(&server.url(path)).unwrap();
    earnings_cal::EcClient::builder()
        .base_quote(url("/quote/"))
        .base_quote_api(url("/v10/finance/quoteSummary/"))
        .base_quote_v7(url("/v7/finance/quote"))
        .base_finnhub(url("/api/v1/"))
        .cookie_url(url("/consent"))
        .crumb_url(url("/v1/test/getcrumb"))
}

pub fn mock_cookie_crumb(server: &'_ MockServer) -> (Mock<'_>, Mock<'_>) {
    let cookie_mock = server.mock(|when, then| {
        when.method(GET).path("/consent");
        then.status(200).header(
            "set-cookie",
            "A=B; Max-Age=315360000; Domain=.yahoo.com; Path=/; Secure; SameSite=None",
        );
    });
    let crumb_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/test/getcrumb");
        then.status(200).body(CRUMB);
    });
    (cookie_mock, crumb_mock)
}

pub fn mock_calendar_api<'a>(server: &'a MockServer, symbol: &'a str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v10/finance/quoteSummary/{}", symbol))
            .query_param("modules", "calendarEvents")
            .query_param("crumb", CRUMB);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("calendar_api", symbol, "json"));
    })
}
