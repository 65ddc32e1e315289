//! Bearer-authenticated user and vehicle reads.

use crate::api::{ApiClient, AuthMode};
use crate::config::ApiConfig;
use crate::data::{Envelope, RequestPaging, User, VehicleIds};
use crate::error::SdkError;

use chrono::{DateTime, Utc};
use reqwest::Method;

/// Client for calls authenticated with a user access token.
pub struct Client {
    config: ApiConfig,
    api: ApiClient,
}

impl Client {
    pub fn new() -> Result<Self, SdkError> {
        Self::with_config(ApiConfig::from_env())
    }

    pub fn with_config(config: ApiConfig) -> Result<Self, SdkError> {
        Ok(Self {
            config,
            api: ApiClient::new()?,
        })
    }

    /// Retrieve the user authenticated with the given access token.
    pub async fn get_user(&self, access_token: &str) -> Result<Envelope<User>, SdkError> {
        let url = self.config.endpoint("user")?;
        let request = self
            .api
            .request(Method::GET, url, &AuthMode::Bearer(access_token));

        self.api.execute(request).await
    }

    /// Retrieve the vehicle ids associated with the authenticated user.
    ///
    /// When `paging` is absent no `limit`/`offset` parameters are sent and
    /// server defaults apply.
    pub async fn get_vehicles(
        &self,
        access_token: &str,
        paging: Option<RequestPaging>,
    ) -> Result<Envelope<VehicleIds>, SdkError> {
        let mut url = self.config.endpoint("vehicles")?;
        if let Some(paging) = paging {
            url.query_pairs_mut()
                .append_pair("limit", &paging.limit.to_string())
                .append_pair("offset", &paging.offset.to_string());
        }

        let request = self
            .api
            .request(Method::GET, url, &AuthMode::Bearer(access_token));

        self.api.execute(request).await
    }
}

/// Whether a token expiry has passed. A token expiring exactly now is
/// already expired.
pub fn is_expired(expiry: DateTime<Utc>) -> bool {
    Utc::now() >= expiry
}
