//! Common test utilities for E2E tests.

#![allow(dead_code)]

use teamcity_harness::ApiResponse;

/// Initialize tracing for tests.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Assert the status code and that the body contains `fragment`.
pub fn assert_rejected(response: &ApiResponse, status: u16, fragment: &str) {
    assert_eq!(
        response.status(),
        status,
        "Unexpected status, body: {}",
        response.body()
    );
    assert!(
        response.body().contains(fragment),
        "Expected body to contain {:?}, got: {}",
        fragment,
        response.body()
    );
}
