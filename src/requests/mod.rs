//! Request layer
//!
//! Every REST resource is reachable through two variants sharing the
//! [`CrudRequest`] interface:
//!
//! - [`UncheckedRequest`]: returns the raw response for the caller to assert on
//! - [`CheckedRequest`]: asserts HTTP 200 and returns the typed entity
//!
//! [`UncheckedRequests`] and [`CheckedRequests`] bundle one request per
//! resource behind a single specification.

pub mod auth;
pub mod checked;
pub mod resources;
pub mod unchecked;

pub use auth::AuthRequest;
pub use checked::{
    CheckedBuildConfig, CheckedProject, CheckedRequest, CheckedRunBuild, CheckedUser,
};
pub use resources::{BuildConfigs, Operation, Projects, Resource, RunBuilds, Users};
pub use unchecked::{
    UncheckedBuildConfig, UncheckedProject, UncheckedRequest, UncheckedRunBuild, UncheckedUser,
};

use crate::api::client::RequestSpec;
use crate::error::RequestResult;
// async_trait keeps the trait object-safe and its futures Send
use async_trait::async_trait;

/// Create/get/update/delete capability set of one resource
///
/// Operations the server does not offer for a resource return
/// [`RequestError::Unsupported`](crate::error::RequestError::Unsupported).
#[async_trait]
pub trait CrudRequest: Send + Sync {
    /// Body sent on create and update
    type Payload: Send + Sync;
    /// Result of create, get and update
    type Output: Send;
    /// Result of delete
    type Deleted: Send;

    async fn create(&self, payload: &Self::Payload) -> RequestResult<Self::Output>;

    async fn get(&self, id: &str) -> RequestResult<Self::Output>;

    async fn update(&self, id: &str, payload: &Self::Payload) -> RequestResult<Self::Output>;

    async fn delete(&self, id: &str) -> RequestResult<Self::Deleted>;
}

/// One unchecked request per resource
#[derive(Clone)]
pub struct UncheckedRequests {
    users: UncheckedUser,
    projects: UncheckedProject,
    build_configs: UncheckedBuildConfig,
    run_builds: UncheckedRunBuild,
}

impl UncheckedRequests {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            users: UncheckedRequest::new(spec.clone()),
            projects: UncheckedRequest::new(spec.clone()),
            build_configs: UncheckedRequest::new(spec.clone()),
            run_builds: UncheckedRequest::new(spec),
        }
    }

    pub fn users(&self) -> &UncheckedUser {
        &self.users
    }

    pub fn projects(&self) -> &UncheckedProject {
        &self.projects
    }

    pub fn build_configs(&self) -> &UncheckedBuildConfig {
        &self.build_configs
    }

    pub fn run_builds(&self) -> &UncheckedRunBuild {
        &self.run_builds
    }
}

/// One checked request per resource
#[derive(Clone)]
pub struct CheckedRequests {
    users: CheckedUser,
    projects: CheckedProject,
    build_configs: CheckedBuildConfig,
    run_builds: CheckedRunBuild,
}

impl CheckedRequests {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            users: CheckedRequest::new(spec.clone()),
            projects: CheckedRequest::new(spec.clone()),
            build_configs: CheckedRequest::new(spec.clone()),
            run_builds: CheckedRequest::new(spec),
        }
    }

    pub fn users(&self) -> &CheckedUser {
        &self.users
    }

    pub fn projects(&self) -> &CheckedProject {
        &self.projects
    }

    pub fn build_configs(&self) -> &CheckedBuildConfig {
        &self.build_configs
    }

    pub fn run_builds(&self) -> &CheckedRunBuild {
        &self.run_builds
    }
}
