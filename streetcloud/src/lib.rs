//! Client library for the StreetCloud vehicle telematics API.
//!
//! The crate covers the full request lifecycle: [`AuthClient`] produces and
//! refreshes OAuth credentials, [`Client`] issues bearer-authenticated reads,
//! and every non-success response is classified into a single [`SdkError`]
//! value so callers handle one failure type.

pub mod auth;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod webhooks;

mod api;
#[cfg(test)]
mod tests;

pub use auth::{AuthClient, AuthUrlBuilder};
pub use client::{Client, is_expired};
pub use config::ApiConfig;
pub use data::{
    Compatibility, Credential, Envelope, RequestPaging, ResponsePaging, User, VehicleIds,
};
pub use error::SdkError;
