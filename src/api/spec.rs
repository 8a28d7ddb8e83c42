//! Request specifications
//!
//! Every request layer obtains its transport through a [`RequestSpec`]
//! produced here. Three kinds exist:
//!
//! - `super_user_spec()`: TeamCity's super user (empty username, token as
//!   password), used for setup and teardown that must bypass permissions
//! - `auth_spec(user)`: basic auth as a generated user
//! - `unauth_spec()`: no credentials at all

use crate::api::client::RequestSpec;
use crate::api::models::User;
use crate::config::ServerConfig;
use crate::error::{ConfigError, RequestError};
use crate::util::SecretString;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use std::time::Duration;

/// Credentials attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No `Authorization` header
    Anonymous,
    /// HTTP basic auth
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Credentials {
    /// Basic auth credentials
    pub fn basic(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header, if any
    pub fn authorization(&self) -> Option<String> {
        match self {
            Credentials::Anonymous => None,
            Credentials::Basic { username, password } => {
                let raw = format!("{}:{}", username, password.expose_secret());
                Some(format!("Basic {}", STANDARD.encode(raw)))
            }
        }
    }

    /// Short description for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::Anonymous => "anonymous",
            Credentials::Basic { username, .. } if username.is_empty() => "super user",
            Credentials::Basic { .. } => "basic",
        }
    }
}

/// Factory for request specifications against one TeamCity server
#[derive(Debug, Clone)]
pub struct Specifications {
    http: Client,
    base_url: String,
    superuser_token: Option<SecretString>,
}

impl Specifications {
    /// Build the shared HTTP client from server configuration
    pub fn new(config: &ServerConfig) -> Result<Self, RequestError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(format!("teamcity-harness/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            superuser_token: config.superuser_token.clone(),
        })
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Specification authenticated as the given user
    pub fn auth_spec(&self, user: &User) -> RequestSpec {
        self.spec(Credentials::basic(
            user.username.clone(),
            user.password.as_str(),
        ))
    }

    /// Specification without credentials
    pub fn unauth_spec(&self) -> RequestSpec {
        self.spec(Credentials::Anonymous)
    }

    /// Specification authenticated as the TeamCity super user
    pub fn super_user_spec(&self) -> Result<RequestSpec, ConfigError> {
        let token = self
            .superuser_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "server.superuser_token (set TEAMCITY_SUPERUSER_TOKEN)".to_string(),
            })?;

        Ok(self.spec(Credentials::basic("", token.clone())))
    }

    fn spec(&self, credentials: Credentials) -> RequestSpec {
        RequestSpec::new(self.http.clone(), self.base_url.clone(), credentials)
    }
}
