//! API key authentication.
//!
//! Topaz authenticates every call with a static per-key header. The key is held as a
//! [`SecretString`] so it never shows up in `Debug` output or logs.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
/// Secret string types that redact values in debug output for security.
pub use secrecy::{ExposeSecret, SecretString};

use crate::Result;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// A Topaz API key, issued by GRV to approved data consumers.
#[derive(Clone, Debug)]
pub struct ApiKey(SecretString);

impl ApiKey {
    #[must_use]
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Returns the key as a secret.
    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.0
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<SecretString> for ApiKey {
    fn from(key: SecretString) -> Self {
        Self(key)
    }
}

/// Headers sent with every request: JSON content negotiation plus the API key.
pub(crate) fn default_headers(key: &ApiKey) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut value = HeaderValue::from_str(key.secret().expose_secret())?;
    value.set_sensitive(true);

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(API_KEY_HEADER, value);

    Ok(headers)
}
