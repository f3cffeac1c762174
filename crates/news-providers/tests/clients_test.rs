//! Integration tests for the provider HTTP clients against a mockito server.
//!
//! Checks request shape (path, query, User-Agent), status handling and body mapping.

use std::time::Duration;

use mockito::Matcher;
use news_providers::{
    NewsApiClient, NewsSource, OpenWeatherClient, ProviderError, QuoteSource, QuotesClient,
    WeatherSource, USER_AGENT,
};

const TIMEOUT: Duration = Duration::from_secs(5);

const ARTICLES_BODY: &str = r#"{
    "status": "ok",
    "totalResults": 2,
    "articles": [
        {"title": "First", "description": "one", "url": "https://news.example/1", "urlToImage": "https://img.example/1.png"},
        {"title": "Second", "description": null, "url": "https://news.example/2", "urlToImage": null}
    ]
}"#;

/// **Test: everything() sends q, apiKey and the bot User-Agent, and maps articles in order.**
#[tokio::test]
async fn test_everything_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/everything")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "moldova".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ARTICLES_BODY)
        .create_async()
        .await;

    let client = NewsApiClient::with_base_url("test-key".into(), server.url(), TIMEOUT).unwrap();
    let articles = client.everything("moldova").await.unwrap();

    mock.assert_async().await;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "First");
    assert_eq!(articles[1].description, "");
    assert_eq!(articles[1].image_url, "");
}

/// **Test: top_headlines() hits /v2/top-headlines with the country parameter.**
#[tokio::test]
async fn test_top_headlines_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("country".into(), "us".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_body(ARTICLES_BODY)
        .create_async()
        .await;

    let client = NewsApiClient::with_base_url("test-key".into(), server.url(), TIMEOUT).unwrap();
    let articles = client.top_headlines("us").await.unwrap();

    mock.assert_async().await;
    assert_eq!(articles.len(), 2);
}

/// **Test: a non-2xx status becomes Transport with that status.**
#[tokio::test]
async fn test_news_http_error_is_transport() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/everything")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status": "error", "code": "apiKeyInvalid"}"#)
        .create_async()
        .await;

    let client = NewsApiClient::with_base_url("bad".into(), server.url(), TIMEOUT).unwrap();
    let err = client.everything("us").await.unwrap_err();

    match err {
        ProviderError::Transport { provider, status } => {
            assert_eq!(provider, "news");
            assert_eq!(status, 401);
        }
        other => panic!("expected Transport, got {:?}", other),
    }
}

/// **Test: 200 without an articles key is EmptyResult.**
#[tokio::test]
async fn test_news_without_articles_is_empty_result() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "ok", "totalResults": 0}"#)
        .create_async()
        .await;

    let client = NewsApiClient::with_base_url("k".into(), server.url(), TIMEOUT).unwrap();
    let err = client.top_headlines("us").await.unwrap_err();

    assert!(err.is_empty_result());
}

/// **Test: an unreachable server is a Request error, not a panic.**
#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Port 9 (discard) on loopback is expected to refuse connections.
    let client =
        NewsApiClient::with_base_url("k".into(), "http://127.0.0.1:9".into(), TIMEOUT).unwrap();
    let err = client.everything("us").await.unwrap_err();

    assert!(matches!(err, ProviderError::Request { .. }));
}

/// **Test: weather request uses metric units and appid, report maps all fields.**
#[tokio::test]
async fn test_weather_current() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Chisinau".into()),
            Matcher::UrlEncoded("units".into(), "metric".into()),
            Matcher::UrlEncoded("appid".into(), "wkey".into()),
        ]))
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_body(
            r#"{
                "weather": [{"description": "light rain"}],
                "main": {"temp": 12.3, "temp_min": 10.0, "temp_max": 14.0, "humidity": 81},
                "wind": {"speed": 4.1},
                "name": "Chisinau"
            }"#,
        )
        .create_async()
        .await;

    let client = OpenWeatherClient::with_base_url("wkey".into(), server.url(), TIMEOUT).unwrap();
    let report = client.current("Chisinau").await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.city, "Chisinau");
    assert_eq!(report.description, "light rain");
    assert_eq!(report.humidity, 81);
    assert_eq!(report.wind_speed, 4.1);
}

/// **Test: weather 404 (unknown city) is Transport.**
#[tokio::test]
async fn test_weather_not_found_is_transport() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"cod": "404", "message": "city not found"}"#)
        .create_async()
        .await;

    let client = OpenWeatherClient::with_base_url("wkey".into(), server.url(), TIMEOUT).unwrap();
    let err = client.current("Atlantis").await.unwrap_err();

    assert!(matches!(err, ProviderError::Transport { status: 404, .. }));
}

/// **Test: quotes client GETs the configured URL and takes the first element.**
#[tokio::test]
async fn test_quote_random() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/random")
        .with_status(200)
        .with_body(r#"[{"q": "Well begun is half done.", "a": "Aristotle"}]"#)
        .create_async()
        .await;

    let url = format!("{}/api/random", server.url());
    let client = QuotesClient::new(&url, TIMEOUT).unwrap();
    let quote = client.random().await.unwrap();

    mock.assert_async().await;
    assert_eq!(quote.text, "Well begun is half done.");
    assert_eq!(quote.author, "Aristotle");
}

/// **Test: an empty quotes array is EmptyResult.**
#[tokio::test]
async fn test_quote_empty_array() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/random")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let url = format!("{}/api/random", server.url());
    let client = QuotesClient::new(&url, TIMEOUT).unwrap();

    assert!(client.random().await.unwrap_err().is_empty_result());
}

/// **Test: QuotesClient::new rejects an unparsable URL.**
#[test]
fn test_quotes_client_rejects_bad_url() {
    assert!(QuotesClient::new("not a url", TIMEOUT).is_err());
}
