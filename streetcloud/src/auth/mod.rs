//! OAuth 2.0 authentication client and vehicle compatibility lookup.
//!
//! [`AuthClient`] is stateless given its client id, secret and redirect URI:
//! every operation is an independent round trip and a refresh never
//! invalidates the credential it was derived from.

use crate::api::{ApiClient, AuthMode};
use crate::config::ApiConfig;
use crate::data::{Compatibility, Credential, Envelope, TokenResponse};
use crate::error::SdkError;

use chrono::Utc;
use common::RedactedSecret;
use log::debug;
use reqwest::Method;
use url::Url;

const URL_AUTHORIZE: &str = "https://connect.streetcloud.io/oauth/authorize";
const URL_ACCESS_TOKEN: &str = "https://auth.streetcloud.io/oauth/token";

const DEFAULT_COMPATIBILITY_COUNTRY: &str = "US";

pub struct AuthClient {
    client_id: String,
    client_secret: RedactedSecret,
    redirect_uri: String,
    test_mode: bool,
    /// Authorization endpoint. Overridable for test servers.
    pub url_authorize: String,
    /// Token endpoint. Overridable for test servers.
    pub url_access_token: String,
    config: ApiConfig,
    api: ApiClient,
}

impl AuthClient {
    /// Initialize a client for the given application registration.
    ///
    /// `test_mode` selects the simulated-vehicle flow when the authorization
    /// URL is built.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        test_mode: bool,
    ) -> Result<Self, SdkError> {
        Self::with_config(
            client_id,
            client_secret,
            redirect_uri,
            test_mode,
            ApiConfig::from_env(),
        )
    }

    /// Initialize a client with an explicit API configuration.
    pub fn with_config(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        test_mode: bool,
        config: ApiConfig,
    ) -> Result<Self, SdkError> {
        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: RedactedSecret::from(client_secret),
            redirect_uri: redirect_uri.to_string(),
            test_mode,
            url_authorize: URL_AUTHORIZE.to_string(),
            url_access_token: URL_ACCESS_TOKEN.to_string(),
            config,
            api: ApiClient::new()?,
        })
    }

    fn basic_auth(&self) -> AuthMode<'_> {
        AuthMode::Basic {
            client_id: &self.client_id,
            client_secret: self.client_secret.as_str(),
        }
    }

    /// Start building a user authorization URL for the given permission
    /// scope.
    pub fn auth_url_builder(&self, scope: &[&str]) -> Result<AuthUrlBuilder, SdkError> {
        let mut url = Url::parse(&self.url_authorize)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("mode", if self.test_mode { "test" } else { "live" })
            .append_pair("scope", &scope.join(" "));

        Ok(AuthUrlBuilder { url })
    }

    /// Exchange an authorization code for a fresh [`Credential`].
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, SdkError> {
        debug!("exchanging authorization code for tokens");
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
        ])
        .await
    }

    /// Exchange a refresh token for a new [`Credential`]. The old credential
    /// is left untouched.
    pub async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Credential, SdkError> {
        debug!("exchanging refresh token for new tokens");
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<Credential, SdkError> {
        let url = Url::parse(&self.url_access_token)?;
        let request = self
            .api
            .request(Method::POST, url, &self.basic_auth())
            .form(form);

        let envelope: Envelope<TokenResponse> = self.api.execute(request).await?;

        Ok(Credential::from_token_response(envelope.data, Utc::now()))
    }

    /// Determine whether a vehicle is compatible with the API for the given
    /// permission scope. `country` defaults to `"US"` when not supplied.
    pub async fn is_compatible(
        &self,
        vin: &str,
        scope: &[&str],
        country: Option<&str>,
    ) -> Result<bool, SdkError> {
        let envelope = self.get_compatibility(vin, scope, country).await?;
        Ok(envelope.data.compatible)
    }

    /// Like [`AuthClient::is_compatible`], but returns the full envelope for
    /// callers that need the request id.
    pub async fn get_compatibility(
        &self,
        vin: &str,
        scope: &[&str],
        country: Option<&str>,
    ) -> Result<Envelope<Compatibility>, SdkError> {
        let mut url = self.config.endpoint("compatibility")?;
        url.query_pairs_mut()
            .append_pair("vin", vin)
            .append_pair("scope", &scope.join(" "))
            .append_pair(
                "country",
                country.unwrap_or(DEFAULT_COMPATIBILITY_COUNTRY),
            );

        let request = self.api.request(Method::GET, url, &self.basic_auth());
        self.api.execute(request).await
    }
}

/// Builder for user authorization URLs.
///
/// Mandatory parameters are appended on construction in a fixed order;
/// optional parameters are appended only when the supplied value is
/// non-empty, so the output is deterministic for a given call sequence.
#[derive(Debug, Clone)]
pub struct AuthUrlBuilder {
    url: Url,
}

impl AuthUrlBuilder {
    /// Opaque state round-tripped through the redirect. An empty string is
    /// treated as "not supplied".
    pub fn state(mut self, state: &str) -> Self {
        if !state.is_empty() {
            self.url.query_pairs_mut().append_pair("state", state);
        }
        self
    }

    /// Force the approval screen instead of letting the server decide.
    pub fn approval_prompt(mut self, force: bool) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair("approval_prompt", if force { "force" } else { "auto" });
        self
    }

    /// Bypass brand selection for a single make.
    pub fn make_bypass(mut self, make: &str) -> Self {
        if !make.is_empty() {
            self.url.query_pairs_mut().append_pair("make", make);
        }
        self
    }

    /// Restrict the flow to a single vehicle.
    pub fn single_select(mut self, single_select: bool) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair("single_select", if single_select { "true" } else { "false" });
        self
    }

    /// Restrict the flow to the vehicle with this VIN.
    pub fn single_select_vin(mut self, vin: &str) -> Self {
        if !vin.is_empty() {
            self.url
                .query_pairs_mut()
                .append_pair("single_select_vin", vin);
        }
        self
    }

    /// Space-joined feature flags.
    pub fn flags(mut self, flags: &[&str]) -> Self {
        if !flags.is_empty() {
            self.url
                .query_pairs_mut()
                .append_pair("flags", &flags.join(" "));
        }
        self
    }

    pub fn build(self) -> String {
        self.url.into()
    }
}
