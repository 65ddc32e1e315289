//! Support types for the StreetCloud SDK.
//!
//! This crate contains pure data structures with no business logic - they're
//! just values that can be passed between layers.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure support types
//! - **streetcloud**: SDK logic operating on them

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
