//! Checked requests
//!
//! Wrap the unchecked variant, require HTTP 200 and deserialize the typed
//! entity. A different status yields [`UnexpectedStatus`](crate::error::RequestError::UnexpectedStatus)
//! carrying the actual status and body, so the test fails right there.
//! Deletes accept any 2xx and return the body text.

use crate::api::client::RequestSpec;
use crate::error::RequestResult;
use crate::requests::CrudRequest;
use crate::requests::resources::{BuildConfigs, Projects, Resource, RunBuilds, Users};
use crate::requests::unchecked::UncheckedRequest;
use async_trait::async_trait;

/// Status TeamCity answers with for every successful CRUD call
pub const SUCCESS_STATUS: u16 = 200;

/// Status-asserting CRUD access to one resource
pub struct CheckedRequest<R: Resource> {
    inner: UncheckedRequest<R>,
}

impl<R: Resource> CheckedRequest<R> {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            inner: UncheckedRequest::new(spec),
        }
    }

    /// The raw variant sharing this request's specification
    pub fn unchecked(&self) -> &UncheckedRequest<R> {
        &self.inner
    }
}

impl<R: Resource> Clone for CheckedRequest<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<R: Resource> CrudRequest for CheckedRequest<R> {
    type Payload = R::Payload;
    type Output = R::Model;
    type Deleted = String;

    async fn create(&self, payload: &R::Payload) -> RequestResult<R::Model> {
        self.inner
            .create(payload)
            .await?
            .expect_status(SUCCESS_STATUS)?
            .json(R::NAME)
    }

    async fn get(&self, id: &str) -> RequestResult<R::Model> {
        self.inner
            .get(id)
            .await?
            .expect_status(SUCCESS_STATUS)?
            .json(R::NAME)
    }

    async fn update(&self, id: &str, payload: &R::Payload) -> RequestResult<R::Model> {
        self.inner
            .update(id, payload)
            .await?
            .expect_status(SUCCESS_STATUS)?
            .json(R::NAME)
    }

    async fn delete(&self, id: &str) -> RequestResult<String> {
        Ok(self
            .inner
            .delete(id)
            .await?
            .expect_success(SUCCESS_STATUS)?
            .into_body())
    }
}

pub type CheckedUser = CheckedRequest<Users>;
pub type CheckedProject = CheckedRequest<Projects>;
pub type CheckedBuildConfig = CheckedRequest<BuildConfigs>;
pub type CheckedRunBuild = CheckedRequest<RunBuilds>;
