// Unit tests for the error classifier.
// Covers both generations of the API error shape plus the unparseable cases.

use crate::error::{SDK_ERROR, SdkError};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    map
}

fn json_headers(request_id: &str) -> HeaderMap {
    headers(&[
        ("SC-Request-Id", request_id),
        ("Content-Type", "application/json"),
    ])
}

#[test]
fn given_legacy_error_body_when_classified_then_kind_comes_from_error_field() {
    let body = r#"{"error":"invalid_token","message":"expired access token","code":"ERR_EXPIRED"}"#;

    let error = SdkError::classify(401, &json_headers("req-legacy"), body);

    assert_eq!(error.status_code, 401);
    assert_eq!(error.kind, "invalid_token");
    assert_eq!(error.description, "expired access token");
    assert_eq!(error.code.as_deref(), Some("ERR_EXPIRED"));
    assert_eq!(error.request_id, "req-legacy");
}

#[test]
fn given_legacy_body_without_message_when_classified_then_error_description_is_used() {
    let body = r#"{"error":"invalid_grant","error_description":"code already redeemed"}"#;

    let error = SdkError::classify(400, &json_headers("req-1"), body);

    assert_eq!(error.kind, "invalid_grant");
    assert_eq!(error.description, "code already redeemed");
    assert_eq!(error.code, None);
}

#[test]
fn given_current_error_body_when_classified_then_all_fields_are_mapped() {
    let body = r#"{
        "type": "VEHICLE_STATE",
        "code": "ASLEEP",
        "description": "The vehicle is asleep.",
        "resolution": "RETRY_LATER",
        "detail": [{"field": "odometer"}],
        "docURL": "https://docs.streetcloud.io/errors/vehicle-state/asleep"
    }"#;

    let error = SdkError::classify(409, &json_headers("req-v2"), body);

    assert_eq!(error.status_code, 409);
    assert_eq!(error.kind, "VEHICLE_STATE");
    assert_eq!(error.code.as_deref(), Some("ASLEEP"));
    assert_eq!(error.description, "The vehicle is asleep.");
    assert_eq!(error.resolution.as_deref(), Some("RETRY_LATER"));
    assert_eq!(error.detail.as_ref().map(Vec::len), Some(1));
    assert_eq!(
        error.doc_url.as_deref(),
        Some("https://docs.streetcloud.io/errors/vehicle-state/asleep")
    );
    assert_eq!(error.request_id, "req-v2");
}

/// **VALUE**: Pins the precedence rule between the two error generations.
///
/// **WHY THIS MATTERS**: The wrapped API shipped two incompatible error
/// schemas over its lifetime. When a proxy or a half-migrated endpoint emits
/// both discriminator fields at once, callers must see the legacy
/// classification, because that is what every existing integration matches
/// on.
///
/// **BUG THIS CATCHES**: Reordering the `error`/`type` checks in
/// `SdkError::classify`.
#[test]
fn given_body_with_both_shapes_when_classified_then_legacy_wins() {
    let body = r#"{
        "error": "invalid_token",
        "message": "legacy description",
        "type": "PERMISSION",
        "description": "current description"
    }"#;

    let error = SdkError::classify(403, &json_headers("req-both"), body);

    assert_eq!(error.kind, "invalid_token");
    assert_eq!(error.description, "legacy description");
}

#[test]
fn given_json_null_code_and_resolution_when_classified_then_fields_are_none() {
    let body = r#"{
        "type": "PERMISSION",
        "code": null,
        "description": "Insufficient permission.",
        "resolution": null,
        "docURL": "https://docs.streetcloud.io/errors/permission"
    }"#;

    let error = SdkError::classify(403, &json_headers("req-null"), body);

    assert_eq!(error.kind, "PERMISSION");
    assert_eq!(error.code, None);
    assert_eq!(error.resolution, None);
    assert_eq!(error.detail, None);
}

/// **VALUE**: Verifies raw body text survives classification of non-JSON
/// responses.
///
/// **WHY THIS MATTERS**: Gateways and proxies return HTML error pages; if we
/// discarded the body the caller would be left with nothing to debug.
#[test]
fn given_non_json_body_when_classified_then_description_is_exact_raw_text() {
    let body = "upstream connect error or disconnect/reset before headers";

    let error = SdkError::classify(500, &json_headers("req-raw"), body);

    assert_eq!(error.kind, SDK_ERROR);
    assert_eq!(error.description, body);
    assert_eq!(error.code, None);
}

#[test]
fn given_html_content_type_when_classified_then_body_is_not_parsed() {
    // Body happens to be valid JSON; content type says otherwise.
    let body = r#"{"error":"invalid_token"}"#;
    let headers = headers(&[("SC-Request-Id", "req-html"), ("Content-Type", "text/html")]);

    let error = SdkError::classify(502, &headers, body);

    assert_eq!(error.kind, SDK_ERROR);
    assert_eq!(error.description, body);
}

#[test]
fn given_missing_request_id_header_when_classified_then_request_id_is_empty() {
    let error = SdkError::classify(500, &HeaderMap::new(), "boom");

    assert_eq!(error.request_id, "");
    assert_eq!(error.kind, SDK_ERROR);
}

#[test]
fn given_unrecognized_json_shape_when_classified_then_sdk_error_with_raw_body() {
    let body = r#"{"status":"failed","reason":"unknown"}"#;

    let error = SdkError::classify(500, &json_headers("req-odd"), body);

    assert_eq!(error.kind, SDK_ERROR);
    assert_eq!(error.description, body);
}

#[test]
fn given_classified_error_when_displayed_then_kind_code_and_description_appear() {
    let body = r#"{"error":"invalid_token","message":"expired access token"}"#;

    let error = SdkError::classify(401, &json_headers("req-1"), body);
    let rendered = format!("{error}");

    assert!(rendered.contains("invalid_token:null"));
    assert!(rendered.contains("expired access token"));
    // Errors carry their construction site for debugging.
    assert!(rendered.contains("error.rs"));
}
