// Token exchange flows against a mock token endpoint.

use crate::helpers::{USER_AGENT, basic_header, config_for};

use chrono::{Duration, Utc};
use streetcloud::AuthClient;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_body() -> &'static str {
    r#"{"access_token":"new-access","refresh_token":"new-refresh","expires_in":7200}"#
}

fn auth_client_for(server: &MockServer) -> AuthClient {
    let mut auth = AuthClient::with_config(
        "client-id",
        "client-secret",
        "https://example.com/callback",
        false,
        config_for(server),
    )
    .expect("client");
    auth.url_access_token = format!("{}/oauth/token", server.uri());
    auth
}

#[tokio::test]
async fn given_authorization_code_when_exchanged_then_credential_is_issued() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header(
            "Authorization",
            basic_header("client-id", "client-secret"),
        ))
        .and(header("User-Agent", USER_AGENT))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains(
            "redirect_uri=https%3A%2F%2Fexample.com%2Fcallback",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-token-1")
                .set_body_raw(token_body(), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client_for(&server);

    let before = Utc::now();
    let credential = auth.exchange_code("auth-code").await.expect("exchange");
    let after = Utc::now();

    assert_eq!(credential.access_token, "new-access");
    assert_eq!(credential.refresh_token, "new-refresh");
    assert!(credential.access_expiry >= before + Duration::seconds(7200));
    assert!(credential.access_expiry <= after + Duration::seconds(7200));
    assert!(credential.refresh_expiry >= before + Duration::days(60));
    assert!(credential.refresh_expiry <= after + Duration::days(60));
}

#[tokio::test]
async fn given_refresh_token_when_exchanged_then_new_credential_is_issued() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header(
            "Authorization",
            basic_header("client-id", "client-secret"),
        ))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-token-2")
                .set_body_raw(token_body(), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client_for(&server);
    let credential = auth
        .exchange_refresh_token("old-refresh")
        .await
        .expect("refresh");

    assert_eq!(credential.access_token, "new-access");
    assert_eq!(credential.refresh_token, "new-refresh");
}

#[tokio::test]
async fn given_rejected_client_when_exchanged_then_error_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("SC-Request-Id", "req-token-3")
                .set_body_raw(
                    r#"{"error":"invalid_client","message":"client authentication failed"}"#,
                    "application/json",
                ),
        )
        .mount(&server)
        .await;

    let auth = auth_client_for(&server);
    let error = auth.exchange_code("auth-code").await.expect_err("401");

    assert_eq!(error.status_code, 401);
    assert_eq!(error.kind, "invalid_client");
    assert_eq!(error.description, "client authentication failed");
    assert_eq!(error.request_id, "req-token-3");
}
