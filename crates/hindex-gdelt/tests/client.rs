//! Integration tests for `GdeltClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use hindex_gdelt::{GdeltClient, GdeltError};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GdeltClient {
    GdeltClient::with_base_url(30, "hindex-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[tokio::test]
async fn fetch_headlines_parses_article_list() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "articles": [
            {
                "url": "https://example.com/a",
                "title": "Ceasefire agreement signed after talks",
                "domain": "Example.COM",
                "seendate": "20250601T123000Z"
            },
            {
                "url": "https://other.org/b",
                "title": "Major flood displaces thousands",
                "domain": "other.org",
                "seendate": "2025-06-02 08:00:00"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(query_param("mode", "ArtList"))
        .and(query_param("query", "*"))
        .and(query_param("maxrecords", "50"))
        .and(query_param("timespan", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .fetch_headlines(1, 50, run_date())
        .await
        .expect("should parse article list");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Ceasefire agreement signed after talks");
    assert_eq!(records[0].source_domain, "example.com");
    assert_eq!(
        records[0].observed_date,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    );
    assert_eq!(
        records[1].observed_date,
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    );
}

#[tokio::test]
async fn fetch_headlines_skips_unusable_entries() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "articles": [
            { "url": "https://example.com/a", "title": "", "domain": "example.com" },
            { "url": "https://example.com/b", "domain": "example.com" },
            { "title": "No url here", "domain": "example.com" },
            {
                "url": "https://example.com/c",
                "title": "Usable headline",
                "domain": "example.com",
                "seendate": "bogus"
            }
        ]
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .fetch_headlines(1, 50, run_date())
        .await
        .expect("should parse article list");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Usable headline");
    // Unparseable seendate falls back to the supplied run date.
    assert_eq!(records[0].observed_date, run_date());
}

#[tokio::test]
async fn missing_articles_key_is_an_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .fetch_headlines(1, 50, run_date())
        .await
        .expect("empty envelope is valid");

    assert!(records.is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_headlines(1, 50, run_date()).await;

    assert!(matches!(result, Err(GdeltError::Deserialize { .. })));
}

#[tokio::test]
async fn server_error_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_headlines(1, 50, run_date()).await;

    assert!(matches!(result, Err(GdeltError::Http(_))));
}

#[tokio::test]
async fn retry_recovers_from_transient_server_error() {
    let server = MockServer::start().await;

    // First attempt fails with a 500; the mounted success mock then takes
    // over for the retry.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({
        "articles": [
            {
                "url": "https://example.com/a",
                "title": "Recovered headline",
                "domain": "example.com",
                "seendate": "20250601T000000Z"
            }
        ]
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .fetch_headlines_with_retry(1, 50, run_date(), 2, 0)
        .await
        .expect("retry should recover");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Recovered headline");
}
