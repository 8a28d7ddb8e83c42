//! Redacting wrapper for credentials.
//!
//! The super user token and generated user passwords travel through request
//! specifications that get logged with `tracing`; this wrapper keeps them out
//! of that output.

use serde::Deserialize;
use std::fmt;

/// A credential that prints as `[REDACTED]`.
///
/// Access to the value requires an explicit `expose_secret()` call, which
/// keeps the places that put a credential on the wire easy to find.
///
/// # Example
/// ```ignore
/// let token = SecretString::new("1234567890");
/// assert_eq!(format!("{token:?}"), "[REDACTED]");
/// let header = format!(":{}", token.expose_secret());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a credential.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Explicitly expose the credential.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Whether the wrapped credential is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString::new)
    }
}
