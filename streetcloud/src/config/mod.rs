//! API endpoint configuration.
//!
//! Captured once at client construction and never mutated afterwards, so a
//! request in flight can never observe a half-updated origin.

use crate::error::SdkError;

use std::env;

use url::Url;

const DEFAULT_API_ORIGIN: &str = "https://api.streetcloud.io";
const DEFAULT_API_VERSION: &str = "2.0";

/// Environment variable overriding the API origin, read once in
/// [`ApiConfig::from_env`].
pub const API_ORIGIN_ENV: &str = "STREETCLOUD_API_ORIGIN";

/// Immutable API origin and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    origin: String,
    version: String,
}

impl ApiConfig {
    /// Build a configuration from the environment, falling back to the
    /// production origin.
    pub fn from_env() -> Self {
        let origin = env::var(API_ORIGIN_ENV)
            .ok()
            .filter(|origin| !origin.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());

        Self {
            origin,
            version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Replace the API origin (scheme + host, no trailing slash).
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Replace the API version used in the path segment.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Versioned base URL for API requests (`<origin>/v<version>`).
    pub(crate) fn api_url(&self) -> String {
        format!("{}/v{}", self.origin, self.version)
    }

    /// Versioned URL for a single endpoint segment.
    pub(crate) fn endpoint(&self, segment: &str) -> Result<Url, SdkError> {
        let mut url = Url::parse(&self.api_url())?;
        url.path_segments_mut()
            .map_err(|_| SdkError::protocol(0, "", "API origin cannot be a base URL"))?
            .push(segment);
        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
