//! TeamCity REST transport
//!
//! A [`RequestSpec`] is one caller's view of the server: base URL, shared
//! HTTP client and credentials. It performs exactly one round-trip per call
//! and hands back the raw [`ApiResponse`]; asserting on it is the caller's job.

use crate::api::spec::Credentials;
use crate::error::{RequestError, RequestResult};
use reqwest::{Client, Method, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

/// Raw HTTP outcome of a request: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Build a response by hand (used by tests and fakes).
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response body as text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`RequestError::UnexpectedStatus`] unless the status matches.
    pub fn expect_status(self, expected: u16) -> RequestResult<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(RequestError::UnexpectedStatus {
                expected,
                actual: self.status,
                body: self.body,
            })
        }
    }

    /// Like [`expect_status`](Self::expect_status) but accepting any 2xx.
    ///
    /// DELETE answers 204 on some TeamCity versions and 200 on others.
    pub fn expect_success(self, expected: u16) -> RequestResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            self.expect_status(expected)
        }
    }

    /// Deserialize the body into a typed entity.
    pub fn json<T: DeserializeOwned>(&self, resource: &'static str) -> RequestResult<T> {
        serde_json::from_str(&self.body).map_err(|e| RequestError::Deserialize {
            resource,
            reason: e.to_string(),
            body: self.body.clone(),
        })
    }

    /// Consume the response, keeping only the body text.
    pub fn into_body(self) -> String {
        self.body
    }
}

/// Transport configuration for one caller
#[derive(Clone)]
pub struct RequestSpec {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl std::fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSpec")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl RequestSpec {
    pub(crate) fn new(http: Client, base_url: String, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Server base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credentials attached to every request
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build a URL for a server path
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach JSON headers and credentials
    fn prepare(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        match self.credentials.authorization() {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        }
    }

    /// Send a request and capture status and body.
    ///
    /// Non-2xx statuses are ordinary values here; only transport failures error.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> RequestResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, auth = self.credentials.kind(), "TeamCity responded");

        Ok(ApiResponse { status, body })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> RequestResult<ApiResponse> {
        let request = self.prepare(Method::GET, path);
        self.execute(Method::GET, path, request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RequestResult<ApiResponse> {
        let payload = serde_json::to_vec(body)?;
        let request = self.prepare(Method::POST, path).body(payload);
        self.execute(Method::POST, path, request).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RequestResult<ApiResponse> {
        let payload = serde_json::to_vec(body)?;
        let request = self.prepare(Method::PUT, path).body(payload);
        self.execute(Method::PUT, path, request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> RequestResult<ApiResponse> {
        let request = self.prepare(Method::DELETE, path);
        self.execute(Method::DELETE, path, request).await
    }
}
