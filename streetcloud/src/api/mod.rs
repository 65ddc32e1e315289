//! Authenticated request execution and envelope decoding.

use crate::data::Envelope;
use crate::error::{REQUEST_ID_HEADER, SdkError};

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::HttpStatusCode;
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// Product identifier attached to every outbound request.
pub(crate) const USER_AGENT: &str =
    const_format::concatcp!("StreetCloud/", env!("CARGO_PKG_VERSION"), " (Rust SDK)");

/// The two authentication schemes the API accepts. Bearer for user-token
/// calls, basic for client-credential calls.
pub(crate) enum AuthMode<'a> {
    Bearer(&'a str),
    Basic {
        client_id: &'a str,
        client_secret: &'a str,
    },
}

impl AuthMode<'_> {
    pub(crate) fn header_value(&self) -> String {
        match self {
            AuthMode::Bearer(token) => format!("Bearer {token}"),
            AuthMode::Basic {
                client_id,
                client_secret,
            } => format!(
                "Basic {}",
                STANDARD.encode(format!("{client_id}:{client_secret}"))
            ),
        }
    }
}

/// Thin wrapper around a shared HTTP client. Holds no per-call state.
#[derive(Clone)]
pub(crate) struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub(crate) fn new() -> Result<Self, SdkError> {
        let http = HttpClient::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;

        Ok(Self { http })
    }

    /// Start a request with the authorization and product headers applied.
    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        auth: &AuthMode<'_>,
    ) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, auth.header_value())
            .header(USER_AGENT_HEADER, USER_AGENT)
    }

    /// Send a prepared request and decode the response.
    ///
    /// 2xx responses are decoded into an [`Envelope`]; everything else is
    /// routed through the classifier and fails the call. Nothing is retried.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, SdkError> {
        let response = request.send().await.map_err(|error| {
            debug!("request dispatch failed: {error}");
            SdkError::transport(&error)
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let request_id = header_value(&headers, REQUEST_ID_HEADER);

        let body = match response.text().await {
            Ok(body) => body,
            Err(_) => {
                return Err(SdkError::protocol(
                    status,
                    request_id.unwrap_or_default(),
                    "unable to read response body",
                ));
            }
        };

        if !HttpStatusCode(status).is_success() {
            debug!("API call failed with status {status}");
            return Err(SdkError::classify(status, &headers, &body));
        }

        // A success response without a request id violates the API contract.
        let request_id = request_id.ok_or_else(|| {
            SdkError::protocol(
                status,
                "",
                format!("response missing {REQUEST_ID_HEADER} header"),
            )
        })?;

        Envelope::decode(status, request_id, &body)
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
