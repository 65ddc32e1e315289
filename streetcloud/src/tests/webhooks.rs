// Unit tests for webhook signature helpers.

use crate::webhooks::{hash_challenge, verify_payload};

// Vector computed independently with a reference HMAC-SHA256
// implementation.
#[test]
fn given_known_inputs_when_challenge_hashed_then_digest_matches_reference() {
    let digest = hash_challenge(
        "application-management-token",
        "2ea5f45c-6cc6-4235-8cc2-7b4a9c1f64b6",
    )
    .expect("hash");

    assert_eq!(digest, "fJNOmLFS6N6rw+iMzPNp0JiSS0mlDUBtcvGnhBsDm4o=");
}

#[test]
fn given_payload_and_matching_signature_when_verified_then_result_is_true() {
    let body = r#"{"eventId":"evt-1"}"#;

    assert!(
        verify_payload(
            "amt-secret",
            "OjGujvFUWQwLJ29E3NZGzVR9Y4xnXybv36O73wbKcIc=",
            body
        )
        .expect("verify")
    );
}

/// Signatures are compared by value: an equal string from any allocation
/// verifies.
#[test]
fn given_heap_allocated_equal_signature_when_verified_then_result_is_true() {
    let body = r#"{"eventId":"evt-1"}"#;
    let signature = hash_challenge("amt-secret", body).expect("hash");
    let copied = String::from_utf8(signature.into_bytes()).expect("utf8");

    assert!(verify_payload("amt-secret", &copied, body).expect("verify"));
}

#[test]
fn given_tampered_payload_when_verified_then_result_is_false() {
    let signature = hash_challenge("amt-secret", r#"{"eventId":"evt-1"}"#).expect("hash");

    assert!(!verify_payload("amt-secret", &signature, r#"{"eventId":"evt-2"}"#).expect("verify"));
}

#[test]
fn given_different_tokens_when_hashed_then_digests_differ() {
    let challenge = "challenge";

    let first = hash_challenge("token-a", challenge).expect("hash");
    let second = hash_challenge("token-b", challenge).expect("hash");

    assert_ne!(first, second);
}
