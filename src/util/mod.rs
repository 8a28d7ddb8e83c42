//! Utility types shared across the harness.

mod secret;

pub use secret::SecretString;

/// Encode a value for use inside a TeamCity locator path segment.
///
/// Locator values are embedded in paths such as `/app/rest/projects/id:{id}`,
/// so reserved characters must be percent-encoded.
pub fn encode_locator(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
