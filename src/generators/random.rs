//! Random identifiers for test entities.
//!
//! Names are `test_` followed by random ASCII letters, which keeps them valid
//! TeamCity external ids and makes leftovers easy to spot on a shared server.

use crate::api::roles::MAX_ID_LENGTH;
use rand::Rng;

/// Prefix marking an entity as generated by the harness
pub const PREFIX: &str = "test_";

/// Number of random letters in a regular identifier
pub const LENGTH: usize = 10;

/// Number of random letters in an over-length identifier
pub const CRITICAL_LENGTH: usize = MAX_ID_LENGTH + 1;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn letters(count: usize) -> String {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect()
}

/// Fresh identifier-safe name, e.g. `test_QwErTyUiOp`
pub fn random_string() -> String {
    format!("{}{}", PREFIX, letters(LENGTH))
}

/// Identifier longer than the server's id/name ceiling, for boundary tests
pub fn long_string() -> String {
    format!("{}{}", PREFIX, letters(CRITICAL_LENGTH))
}
