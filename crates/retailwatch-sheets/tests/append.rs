//! Integration tests for `SheetsClient` against a wiremock server.
//!
//! The service-account key fixture is a throwaway RSA key generated for
//! this test suite; its `token_uri` points back at the mock server so the
//! full JWT-bearer exchange runs locally.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use retailwatch_core::ProductRecord;
use retailwatch_sheets::{ServiceAccountKey, SheetsClient, SheetsError};

const TEST_KEY_PEM: &str = include_str!("fixtures/test_key.pem");

fn test_key(server_uri: &str) -> ServiceAccountKey {
    let json = json!({
        "type": "service_account",
        "client_email": "retailwatch-test@project.iam.gserviceaccount.com",
        "private_key": TEST_KEY_PEM,
        "token_uri": format!("{server_uri}/token"),
    });
    serde_json::from_value(json).expect("fixture key JSON must deserialize")
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type="))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-access-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap()
}

fn record(website: &str, name: &str, url: &str) -> ProductRecord {
    ProductRecord {
        timestamp: at(),
        website: website.to_string(),
        name: name.to_string(),
        brand: "N/A".to_string(),
        price: "9.99".to_string(),
        availability: "In Stock".to_string(),
        url: url.to_string(),
    }
}

async fn connect(server: &MockServer) -> SheetsClient {
    let key = test_key(&server.uri());
    SheetsClient::connect_with_base_url(&key, "sheet-1", 5, &server.uri())
        .await
        .expect("connect should succeed against mock token endpoint")
}

#[tokio::test]
async fn connect_exchanges_signed_assertion_for_token() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let key = test_key(&server.uri());
    let result = SheetsClient::connect_with_base_url(&key, "sheet-1", 5, &server.uri()).await;
    assert!(result.is_ok(), "expected Ok, got: {:?}", result.err());
}

#[tokio::test]
async fn connect_fails_when_token_endpoint_rejects() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_grant"})),
        )
        .mount(&server)
        .await;

    let key = test_key(&server.uri());
    let result = SheetsClient::connect_with_base_url(&key, "sheet-1", 5, &server.uri()).await;
    assert!(
        matches!(result, Err(SheetsError::Auth { .. })),
        "expected Auth error, got: {result:?}"
    );
}

#[tokio::test]
async fn empty_worksheet_gets_header_then_rows_in_batch_order() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .and(query_param("fields", "sheets.properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": [{"properties": {"sheetId": 0, "title": "Sheet1"}}]
        })))
        .mount(&server)
        .await;

    // Empty worksheet: the values response carries no `values` key.
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:A1", "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:append"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(query_param("insertDataOption", "INSERT_ROWS"))
        .and(body_partial_json(json!({
            "values": [
                ["timestamp", "website", "name", "brand", "price", "availability", "url"],
                ["2024-06-01 06:30:00", "amazon", "Widget", "N/A", "9.99", "In Stock", "https://a/1"],
                ["2024-06-01 06:30:00", "ebay", "Gadget", "N/A", "9.99", "In Stock", "https://e/1"],
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": {"updatedRows": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let batch = vec![
        record("amazon", "Widget", "https://a/1"),
        record("ebay", "Gadget", "https://e/1"),
    ];
    let appended = client.append_run("Sheet1", &batch).await.unwrap();
    assert_eq!(appended, 2);
}

#[tokio::test]
async fn populated_worksheet_appends_without_header() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": [{"properties": {"sheetId": 0, "title": "Sheet1"}}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:A1", "values": [["timestamp"]]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:append"))
        .and(body_partial_json(json!({
            "values": [
                ["2024-06-01 06:30:00", "amazon", "Widget", "N/A", "9.99", "In Stock", "https://a/1"],
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": {"updatedRows": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let batch = vec![record("amazon", "Widget", "https://a/1")];
    let appended = client.append_run("Sheet1", &batch).await.unwrap();
    assert_eq!(appended, 1);
}

#[tokio::test]
async fn missing_worksheet_is_created_before_append() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    // The spreadsheet only has an unrelated tab.
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": [{"properties": {"sheetId": 7, "title": "Scratch"}}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [{"addSheet": {"properties": {"title": "Sheet1"}}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"replies": [{}]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:A1", "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:append"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": {"updatedRows": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let batch = vec![record("amazon", "Widget", "https://a/1")];
    assert!(client.append_run("Sheet1", &batch).await.is_ok());
}

#[tokio::test]
async fn quota_error_on_append_is_fatal() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": [{"properties": {"sheetId": 0, "title": "Sheet1"}}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:A1", "values": [["timestamp"]]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A1:append"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let batch = vec![record("amazon", "Widget", "https://a/1")];
    let result = client.append_run("Sheet1", &batch).await;
    assert!(
        matches!(result, Err(SheetsError::Api { status: 429, .. })),
        "expected Api(429), got: {result:?}"
    );
}
