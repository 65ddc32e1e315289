//! Value objects produced per call: envelopes, paging, payloads and
//! credentials. None of them are shared or mutated after creation.

use crate::error::SdkError;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Fixed policy lifetime of a refresh token. Independent of whatever
/// `expires_in` the server declares for the access token.
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

/// A decoded payload plus the transport-level metadata that accompanied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub request_id: String,
    pub paging: Option<ResponsePaging>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a successful response body.
    ///
    /// The optional `paging` sub-object is extracted separately from the
    /// payload; a body that does not match `T` is a protocol error, not an
    /// API-declared failure.
    pub(crate) fn decode(
        status_code: u16,
        request_id: String,
        body: &str,
    ) -> Result<Self, SdkError> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|error| {
            SdkError::protocol(
                status_code,
                request_id.clone(),
                format!("response body is not valid JSON: {error}"),
            )
        })?;

        let paging = value
            .get("paging")
            .map(|paging| serde_json::from_value::<ResponsePaging>(paging.clone()))
            .transpose()
            .map_err(|error| {
                SdkError::protocol(
                    status_code,
                    request_id.clone(),
                    format!("malformed paging object: {error}"),
                )
            })?;

        let data: T = serde_json::from_value(value).map_err(|error| {
            SdkError::protocol(
                status_code,
                request_id.clone(),
                format!("response body does not match the expected shape: {error}"),
            )
        })?;

        Ok(Self {
            data,
            request_id,
            paging,
        })
    }
}

/// Paging parameters supplied by the caller. When absent, no `limit`/`offset`
/// query parameters are sent at all and server defaults apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPaging {
    pub limit: i32,
    pub offset: i32,
}

/// Paging metadata returned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePaging {
    pub count: i32,
    pub offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIds {
    pub vehicles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub compatible: bool,
}

/// Raw token endpoint response, before expiries are computed.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) expires_in: i64,
}

/// An OAuth access/refresh token pair with computed expiries.
///
/// Never mutated in place - a refresh exchange produces a new value and the
/// old one stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expiry: DateTime<Utc>,
    pub refresh_expiry: DateTime<Utc>,
}

impl Credential {
    pub(crate) fn from_token_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            access_expiry: issued_at + Duration::seconds(response.expires_in),
            refresh_expiry: issued_at + Duration::days(REFRESH_TOKEN_LIFETIME_DAYS),
        }
    }
}
