//! The single failure type for the SDK.
//!
//! Transport problems, undecodable bodies and API-declared failures all
//! collapse into [`SdkError`]; the two classes are distinguished by `kind`
//! ([`SDK_ERROR`] for the former, the API's own category for the latter).

use common::ErrorLocation;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;
use thiserror::Error as ThisError;

/// Fallback `kind` for any response the API did not classify itself.
pub const SDK_ERROR: &str = "SDK_ERROR";

/// Header carrying the per-request identifier on every API response.
pub(crate) const REQUEST_ID_HEADER: &str = "SC-Request-Id";

/// A classified API or protocol failure.
///
/// Created exactly once per failed call and never retried automatically.
#[derive(Debug, ThisError)]
#[error("{kind}:{} - {description} {location}", .code.as_deref().unwrap_or("null"))]
pub struct SdkError {
    pub status_code: u16,
    pub kind: String,
    pub code: Option<String>,
    pub description: String,
    pub resolution: Option<String>,
    pub detail: Option<Vec<Value>>,
    pub doc_url: Option<String>,
    pub request_id: String,
    pub location: ErrorLocation,
}

impl SdkError {
    /// A protocol-level failure: something went wrong before an API error
    /// body could be interpreted.
    #[track_caller]
    pub(crate) fn protocol(
        status_code: u16,
        request_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            kind: SDK_ERROR.to_string(),
            code: None,
            description: description.into(),
            resolution: None,
            detail: None,
            doc_url: None,
            request_id: request_id.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// A transport failure raised before any response body was available.
    #[track_caller]
    pub(crate) fn transport(error: &reqwest::Error) -> Self {
        let status_code = error.status().map(|status| status.as_u16()).unwrap_or(0);
        Self::protocol(status_code, "", error.to_string())
    }

    /// Map a non-success response to a structured error.
    ///
    /// The order of checks encodes two generations of the API's error
    /// contract and must not be reordered: the legacy OAuth shape (`error`
    /// field) wins over the current shape (`type` field) when both are
    /// present.
    #[track_caller]
    pub(crate) fn classify(status_code: u16, headers: &HeaderMap, body: &str) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let location = ErrorLocation::caller();

        let unclassified = |description: String| Self {
            status_code,
            kind: SDK_ERROR.to_string(),
            code: None,
            description,
            resolution: None,
            detail: None,
            doc_url: None,
            request_id: request_id.clone(),
            location,
        };

        // HTML error pages, proxy output and the like.
        if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
        {
            if !content_type.contains("application/json") {
                return unclassified(body.to_string());
            }
        }

        let parsed: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => return unclassified(body.to_string()),
        };

        if let Some(error_field) = parsed.get("error") {
            // Legacy OAuth-style shape.
            let kind = error_field
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error_field.to_string());
            let description = parsed
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| parsed.get("error_description").and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            let code = parsed
                .get("code")
                .and_then(Value::as_str)
                .map(str::to_string);

            return Self {
                status_code,
                kind,
                code,
                description,
                resolution: None,
                detail: None,
                doc_url: None,
                request_id: request_id.clone(),
                location,
            };
        }

        if let Some(kind) = parsed.get("type").and_then(Value::as_str) {
            // Current API shape. `code` and `resolution` are kept only when
            // they are not an explicit JSON null.
            let description = parsed
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            let code = parsed
                .get("code")
                .and_then(Value::as_str)
                .map(str::to_string);
            let resolution = parsed
                .get("resolution")
                .and_then(Value::as_str)
                .map(str::to_string);
            let detail = parsed
                .get("detail")
                .and_then(Value::as_array)
                .map(|items| items.to_vec());
            let doc_url = parsed
                .get("docURL")
                .and_then(Value::as_str)
                .map(str::to_string);

            return Self {
                status_code,
                kind: kind.to_string(),
                code,
                description,
                resolution,
                detail,
                doc_url,
                request_id: request_id.clone(),
                location,
            };
        }

        unclassified(body.to_string())
    }
}

impl From<url::ParseError> for SdkError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        SdkError::protocol(0, "", error.to_string())
    }
}

impl From<reqwest::Error> for SdkError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        SdkError::transport(&error)
    }
}
