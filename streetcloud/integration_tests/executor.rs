// End-to-end executor behavior against a mock server: envelope decoding,
// header injection and error routing.

use crate::helpers::{USER_AGENT, config_for};

use streetcloud::error::SDK_ERROR;
use streetcloud::{Client, User};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_success_response_when_user_fetched_then_envelope_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/user"))
        .and(header("Authorization", "Bearer access-token"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-user-1")
                .set_body_raw(r#"{"id":"user-1"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let envelope = client.get_user("access-token").await.expect("get_user");

    assert_eq!(
        envelope.data,
        User {
            id: "user-1".to_string()
        }
    );
    assert_eq!(envelope.request_id, "req-user-1");
    assert_eq!(envelope.paging, None);
}

/// **VALUE**: A success response without the request-id header is a protocol
/// violation, not something to silently ignore.
#[tokio::test]
async fn given_success_without_request_id_when_fetched_then_protocol_error_is_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/user"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"id":"user-1"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let error = client.get_user("access-token").await.expect_err("missing header");

    assert_eq!(error.kind, SDK_ERROR);
    assert_eq!(error.status_code, 200);
    assert!(error.description.contains("SC-Request-Id"));
}

#[tokio::test]
async fn given_legacy_error_response_when_fetched_then_error_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/user"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("SC-Request-Id", "req-err-1")
                .set_body_raw(
                    r#"{"error":"invalid_token","message":"expired access token"}"#,
                    "application/json",
                ),
        )
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let error = client.get_user("stale-token").await.expect_err("401");

    assert_eq!(error.status_code, 401);
    assert_eq!(error.kind, "invalid_token");
    assert_eq!(error.description, "expired access token");
    assert_eq!(error.request_id, "req-err-1");
}

#[tokio::test]
async fn given_current_error_response_when_fetched_then_all_fields_survive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/user"))
        .respond_with(
            ResponseTemplate::new(409)
                .insert_header("SC-Request-Id", "req-err-2")
                .set_body_raw(
                    r#"{
                        "type": "VEHICLE_STATE",
                        "code": "ASLEEP",
                        "description": "The vehicle is asleep.",
                        "resolution": "RETRY_LATER",
                        "docURL": "https://docs.streetcloud.io/errors/vehicle-state/asleep"
                    }"#,
                    "application/json",
                ),
        )
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let error = client.get_user("access-token").await.expect_err("409");

    assert_eq!(error.kind, "VEHICLE_STATE");
    assert_eq!(error.code.as_deref(), Some("ASLEEP"));
    assert_eq!(error.resolution.as_deref(), Some("RETRY_LATER"));
    assert_eq!(
        error.doc_url.as_deref(),
        Some("https://docs.streetcloud.io/errors/vehicle-state/asleep")
    );
}

#[tokio::test]
async fn given_plain_text_500_when_fetched_then_raw_body_becomes_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/user"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("SC-Request-Id", "req-err-3")
                .set_body_raw("Internal Server Error", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let error = client.get_user("access-token").await.expect_err("500");

    assert_eq!(error.kind, SDK_ERROR);
    assert_eq!(error.description, "Internal Server Error");
    assert_eq!(error.request_id, "req-err-3");
}

#[tokio::test]
async fn given_payload_shape_mismatch_when_fetched_then_protocol_error_is_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-user-2")
                .set_body_raw(r#"{"identifier":"user-1"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let error = client.get_user("access-token").await.expect_err("wrong shape");

    assert_eq!(error.kind, SDK_ERROR);
    assert!(error.description.contains("expected shape"));
}
