// Compatibility lookup: query parameters, basic auth, boolean result.

use crate::helpers::{basic_header, config_for};

use streetcloud::AuthClient;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_client_for(server: &MockServer) -> AuthClient {
    AuthClient::with_config(
        "client-id",
        "client-secret",
        "https://example.com/callback",
        false,
        config_for(server),
    )
    .expect("client")
}

#[tokio::test]
async fn given_compatible_vehicle_when_checked_then_true_with_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/compatibility"))
        .and(query_param("vin", "1FAFP42X0XF000000"))
        .and(query_param("scope", "read_odometer"))
        .and(query_param("country", "US"))
        .and(header(
            "Authorization",
            basic_header("client-id", "client-secret"),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-compat-1")
                .set_body_raw(r#"{"compatible":true}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client_for(&server);
    let compatible = auth
        .is_compatible("1FAFP42X0XF000000", &["read_odometer"], None)
        .await
        .expect("is_compatible");

    assert!(compatible);
}

#[tokio::test]
async fn given_multiple_scopes_and_country_when_checked_then_parameters_are_joined() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/compatibility"))
        .and(query_param("scope", "read_odometer read_location"))
        .and(query_param("country", "DE"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-compat-2")
                .set_body_raw(r#"{"compatible":false}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client_for(&server);
    let envelope = auth
        .get_compatibility(
            "1FAFP42X0XF000000",
            &["read_odometer", "read_location"],
            Some("DE"),
        )
        .await
        .expect("get_compatibility");

    assert!(!envelope.data.compatible);
    assert_eq!(envelope.request_id, "req-compat-2");
}
