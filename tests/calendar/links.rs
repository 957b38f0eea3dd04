use chrono::{Duration, NaiveDate, NaiveDateTime};
use earnings_cal::calendar::DEFAULT_LOCATION;
use earnings_cal::{CalendarLinkBuilder, Confidence, EarningsEvent, EventTime, ProviderId};
use url::Url;

const DATES_FMT: &str = "%Y%m%dT%H%M%S";

fn feb26() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 26).unwrap()
}

fn query(link: &str) -> Vec<(String, String)> {
    Url::parse(link)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn param(pairs: &[(String, String)], key: &str) -> String {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| panic!("missing {key}"))
}

#[test]
fn nvda_call_in_helsinki() {
    let start = feb26().and_hms_opt(21, 0, 0).unwrap();
    let link = CalendarLinkBuilder::for_provider(ProviderId::YahooCalendar).build(
        "NVDA",
        "Earnings Call",
        start.into(),
        "Helsinki",
    );
    let s = link.as_str();
    assert!(s.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE&"), "{s}");
    assert!(s.contains("dates=20250226T210000/20250226T220000"), "{s}");
    assert!(s.contains("location=Helsinki"), "{s}");
}

#[test]
fn decoded_query_round_trips_to_the_inputs() {
    let start = feb26().and_hms_opt(8, 15, 0).unwrap();
    let link = CalendarLinkBuilder::new().build(
        "KESKOB.HE",
        "Earnings Date (est.)",
        start.into(),
        "Online / Helsinki & Espoo",
    );
    let pairs = query(link.as_str());

    assert_eq!(param(&pairs, "action"), "TEMPLATE");
    assert_eq!(param(&pairs, "text"), "Earnings Date (est.): KESKOB.HE");
    assert_eq!(param(&pairs, "location"), "Online / Helsinki & Espoo");
    assert!(param(&pairs, "details").contains("KESKOB.HE"));

    let dates = param(&pairs, "dates");
    let (s, e) = dates.split_once('/').unwrap();
    let s = NaiveDateTime::parse_from_str(s, DATES_FMT).unwrap();
    let e = NaiveDateTime::parse_from_str(e, DATES_FMT).unwrap();
    assert_eq!(s, start);
    assert_eq!(e - s, Duration::hours(1));
    assert_eq!((link.start, link.end), (s, e));
}

#[test]
fn date_only_events_start_at_nine() {
    let link = CalendarLinkBuilder::new().build(
        "NVDA",
        "Earnings Release",
        EventTime::Date(feb26()),
        DEFAULT_LOCATION,
    );
    assert!(link.as_str().contains("dates=20250226T090000/20250226T100000"));
    assert!(link.as_str().ends_with("location=Online"));
}

#[test]
fn same_inputs_same_link() {
    let builder = CalendarLinkBuilder::for_provider(ProviderId::Finnhub);
    let a = builder.build("NVDA", "Earnings Call", EventTime::Date(feb26()), DEFAULT_LOCATION);
    let b = builder.build("NVDA", "Earnings Call", EventTime::Date(feb26()), DEFAULT_LOCATION);
    assert_eq!(a, b);
}

#[test]
fn build_all_keeps_event_order() {
    let events = vec![
        EarningsEvent {
            label: "Earnings Date (est.)".into(),
            timestamp: EventTime::Date(feb26()),
            confidence: Confidence::Estimated,
        },
        EarningsEvent {
            label: "Earnings Date (est.)".into(),
            timestamp: EventTime::Date(feb26() + Duration::days(2)),
            confidence: Confidence::Estimated,
        },
    ];
    let links = CalendarLinkBuilder::new().build_all("NVDA", &events, DEFAULT_LOCATION);
    assert_eq!(links.len(), 2);
    assert!(links[0].as_str().contains("dates=20250226T090000/"));
    assert!(links[1].as_str().contains("dates=20250228T090000/"));
    assert!(links.iter().all(|l| l.ticker == "NVDA"));
}

#[test]
fn custom_endpoint_is_respected() {
    let link = CalendarLinkBuilder::new()
        .base_url("https://example.test/render")
        .build("NVDA", "Earnings Call", EventTime::Date(feb26()), DEFAULT_LOCATION);
    assert!(link.as_str().starts_with("https://example.test/render?action=TEMPLATE&"));
}
