//! Webhook challenge hashing and payload signature verification.

use crate::error::SdkError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn hash(key: &str, message: &str) -> Result<String, SdkError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|error| SdkError::protocol(0, "", error.to_string()))?;
    mac.update(message.as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Answer a webhook verification challenge.
pub fn hash_challenge(
    application_management_token: &str,
    challenge: &str,
) -> Result<String, SdkError> {
    hash(application_management_token, challenge)
}

/// Check a delivered payload against its signature header. Signatures are
/// compared by value.
pub fn verify_payload(
    application_management_token: &str,
    signature: &str,
    body: &str,
) -> Result<bool, SdkError> {
    Ok(hash(application_management_token, body)? == signature)
}
