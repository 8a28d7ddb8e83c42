//! Authentication probe

use crate::api::client::RequestSpec;
use crate::error::RequestResult;
use crate::requests::checked::SUCCESS_STATUS;
use tracing::instrument;

const CSRF_ENDPOINT: &str = "/authenticationTest.html?csrf";

/// Verifies credentials against the server's authentication test page
pub struct AuthRequest {
    spec: RequestSpec,
}

impl AuthRequest {
    pub fn new(spec: RequestSpec) -> Self {
        Self { spec }
    }

    /// Fetch a CSRF token; succeeds only if the credentials are accepted.
    #[instrument(skip(self), fields(auth = self.spec.credentials().kind()))]
    pub async fn csrf_token(&self) -> RequestResult<String> {
        let response = self
            .spec
            .get(CSRF_ENDPOINT)
            .await?
            .expect_status(SUCCESS_STATUS)?;

        Ok(response.into_body().trim().to_string())
    }
}
