//! Authentication scheme descriptors.
//!
//! Two fixed schemes, installed by the registrar under the component keys
//! [`API_KEY_SCHEME`] and [`JWT_SCHEME`].

use crate::openapi::SecurityScheme;

/// Component key for the API key scheme.
pub const API_KEY_SCHEME: &str = "api_key";

/// Component key for the bearer JWT scheme.
pub const JWT_SCHEME: &str = "jwt";

/// Default header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API key authentication via the default `X-API-Key` header.
#[must_use]
pub fn api_key() -> SecurityScheme {
    api_key_with_header(API_KEY_HEADER)
}

/// API key authentication via a custom header.
#[must_use]
pub fn api_key_with_header(header: impl Into<String>) -> SecurityScheme {
    let header = header.into();
    SecurityScheme {
        scheme_type: "apiKey".to_string(),
        description: Some(format!("API key authentication via {header} header")),
        scheme: None,
        bearer_format: None,
        location: Some("header".to_string()),
        name: Some(header),
    }
}

/// Bearer JWT authentication.
#[must_use]
pub fn jwt() -> SecurityScheme {
    SecurityScheme {
        scheme_type: "http".to_string(),
        description: Some("JWT Bearer token authentication".to_string()),
        scheme: Some("bearer".to_string()),
        bearer_format: Some("JWT".to_string()),
        location: None,
        name: None,
    }
}
