//! Integration tests for `PageClient::fetch_page` against a wiremock server.

use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use retailwatch_scraper::{PageClient, ScraperError};

fn test_client() -> PageClient {
    PageClient::new(5, Some("retailwatch-test/0.1"), 0, 0).expect("failed to build PageClient")
}

#[tokio::test]
async fn returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B08P2H5LW2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>product</html>"))
        .mount(&server)
        .await;

    let client = test_client();
    let body = client
        .fetch_page(&format!("{}/dp/B08P2H5LW2", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<html>product</html>");
}

#[tokio::test]
async fn sends_browser_like_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/p1"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_page(&format!("{}/p1", server.uri())).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn non_2xx_status_is_a_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // a 404 must not be retried
        .mount(&server)
        .await;

    let client = PageClient::new(5, Some("retailwatch-test/0.1"), 3, 0).unwrap();
    let result = client.fetch_page(&format!("{}/gone", server.uri())).await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_retried_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&server)
        .await;

    let client = PageClient::new(5, Some("retailwatch-test/0.1"), 3, 0).unwrap();
    let body = client
        .fetch_page(&format!("{}/flaky", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn server_error_fails_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // default policy: single attempt per URL
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_page(&format!("{}/down", server.uri())).await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn blocked_interstitial_is_rejected_after_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robot-check"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html>To discuss automated access contact api-services-support@amazon.com</html>",
        ))
        .mount(&server)
        .await;

    let client = test_client();
    let rules = retailwatch_scraper::rules_for("amazon").unwrap();
    let result = retailwatch_scraper::fetch_product_page(
        &client,
        rules,
        &format!("{}/robot-check", server.uri()),
    )
    .await;
    assert!(
        matches!(result, Err(ScraperError::Blocked { .. })),
        "expected Blocked, got: {result:?}"
    );
}
