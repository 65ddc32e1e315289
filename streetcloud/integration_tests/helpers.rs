use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use streetcloud::ApiConfig;
use wiremock::MockServer;

/// The product identifier every outbound request must carry.
pub const USER_AGENT: &str = concat!("StreetCloud/", env!("CARGO_PKG_VERSION"), " (Rust SDK)");

/// API configuration pointed at a mock server.
pub fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig::from_env().with_origin(server.uri())
}

/// The Basic authorization header value for a client id/secret pair.
pub fn basic_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}
