// Paging behavior: parameters appear exactly when a RequestPaging is
// supplied.

use crate::helpers::config_for;

use streetcloud::{Client, RequestPaging, ResponsePaging};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_paging_when_vehicles_listed_then_limit_and_offset_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/vehicles"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-veh-1")
                .set_body_raw(
                    r#"{"vehicles":["veh-1"],"paging":{"count":1,"offset":0}}"#,
                    "application/json",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let envelope = client
        .get_vehicles("access-token", Some(RequestPaging { limit: 10, offset: 0 }))
        .await
        .expect("get_vehicles");

    assert_eq!(envelope.data.vehicles, vec!["veh-1".to_string()]);
    assert_eq!(
        envelope.paging,
        Some(ResponsePaging { count: 1, offset: 0 })
    );
}

/// **VALUE**: Absent paging means the parameters are not sent at all, not
/// sent with default values - server defaults must apply.
#[tokio::test]
async fn given_no_paging_when_vehicles_listed_then_parameters_are_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/vehicles"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("offset"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SC-Request-Id", "req-veh-2")
                .set_body_raw(r#"{"vehicles":["veh-1","veh-2"]}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_config(config_for(&server)).expect("client");
    let envelope = client
        .get_vehicles("access-token", None)
        .await
        .expect("get_vehicles");

    assert_eq!(envelope.data.vehicles.len(), 2);
    assert_eq!(envelope.paging, None);
}
