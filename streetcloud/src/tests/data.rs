// Unit tests for envelope decoding and payload round-trips.

use crate::data::{Envelope, ResponsePaging, User, VehicleIds};
use crate::error::SDK_ERROR;

#[test]
fn given_body_with_paging_when_decoded_then_payload_and_paging_are_split() {
    let body = r#"{"vehicles":["veh-1","veh-2"],"paging":{"count":25,"offset":10}}"#;

    let envelope: Envelope<VehicleIds> =
        Envelope::decode(200, "req-1".to_string(), body).expect("decode");

    assert_eq!(
        envelope.data.vehicles,
        vec!["veh-1".to_string(), "veh-2".to_string()]
    );
    assert_eq!(envelope.request_id, "req-1");
    assert_eq!(
        envelope.paging,
        Some(ResponsePaging {
            count: 25,
            offset: 10
        })
    );
}

#[test]
fn given_body_without_paging_when_decoded_then_paging_is_none() {
    let envelope: Envelope<User> =
        Envelope::decode(200, "req-2".to_string(), r#"{"id":"user-1"}"#).expect("decode");

    assert_eq!(envelope.data.id, "user-1");
    assert_eq!(envelope.paging, None);
}

#[test]
fn given_malformed_paging_object_when_decoded_then_protocol_error_is_raised() {
    let body = r#"{"vehicles":[],"paging":{"count":"not-a-number"}}"#;

    let error = Envelope::<VehicleIds>::decode(200, "req-3".to_string(), body)
        .expect_err("malformed paging");

    assert_eq!(error.kind, SDK_ERROR);
    assert_eq!(error.request_id, "req-3");
    assert!(error.description.contains("paging"));
}

#[test]
fn given_non_json_body_when_decoded_then_protocol_error_is_raised() {
    let error =
        Envelope::<User>::decode(200, "req-4".to_string(), "<html></html>").expect_err("not JSON");

    assert_eq!(error.kind, SDK_ERROR);
    assert!(error.description.contains("not valid JSON"));
}

#[test]
fn given_shape_mismatch_when_decoded_then_protocol_error_is_raised() {
    let error = Envelope::<User>::decode(200, "req-5".to_string(), r#"{"identifier":"user-1"}"#)
        .expect_err("wrong shape");

    assert_eq!(error.kind, SDK_ERROR);
    assert!(error.description.contains("expected shape"));
}

/// Decoding then re-encoding a payload is lossless.
#[test]
fn given_decoded_payload_when_reencoded_then_data_round_trips() {
    let body = r#"{"id":"user-1"}"#;

    let envelope: Envelope<User> =
        Envelope::decode(200, "req-6".to_string(), body).expect("decode");
    let reencoded = serde_json::to_string(&envelope.data).expect("encode");
    let decoded_again: User = serde_json::from_str(&reencoded).expect("decode again");

    assert_eq!(envelope.data, decoded_again);
}
