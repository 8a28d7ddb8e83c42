//! Unchecked requests
//!
//! Each call is one round-trip returning the raw [`ApiResponse`], whatever the
//! status. Only transport failures and unsupported operations are errors.

use crate::api::client::{ApiResponse, RequestSpec};
use crate::error::{RequestError, RequestResult};
use crate::requests::CrudRequest;
use crate::requests::resources::{BuildConfigs, Operation, Projects, Resource, RunBuilds, Users};
use async_trait::async_trait;
use std::marker::PhantomData;

/// Raw CRUD access to one resource
pub struct UncheckedRequest<R: Resource> {
    spec: RequestSpec,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> UncheckedRequest<R> {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            spec,
            _resource: PhantomData,
        }
    }

    /// Specification this request sends with
    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    fn ensure_supported(operation: Operation) -> RequestResult<()> {
        if R::supports(operation) {
            Ok(())
        } else {
            Err(RequestError::Unsupported {
                resource: R::NAME,
                operation: operation.as_str(),
            })
        }
    }
}

impl<R: Resource> Clone for UncheckedRequest<R> {
    fn clone(&self) -> Self {
        Self::new(self.spec.clone())
    }
}

#[async_trait]
impl<R: Resource> CrudRequest for UncheckedRequest<R> {
    type Payload = R::Payload;
    type Output = ApiResponse;
    type Deleted = ApiResponse;

    async fn create(&self, payload: &R::Payload) -> RequestResult<ApiResponse> {
        Self::ensure_supported(Operation::Create)?;
        self.spec.post(R::ENDPOINT, payload).await
    }

    async fn get(&self, id: &str) -> RequestResult<ApiResponse> {
        Self::ensure_supported(Operation::Get)?;
        self.spec.get(&R::entity_path(id)).await
    }

    async fn update(&self, id: &str, payload: &R::Payload) -> RequestResult<ApiResponse> {
        Self::ensure_supported(Operation::Update)?;
        self.spec.put(&R::entity_path(id), payload).await
    }

    async fn delete(&self, id: &str) -> RequestResult<ApiResponse> {
        Self::ensure_supported(Operation::Delete)?;
        self.spec.delete(&R::entity_path(id)).await
    }
}

pub type UncheckedUser = UncheckedRequest<Users>;
pub type UncheckedProject = UncheckedRequest<Projects>;
pub type UncheckedBuildConfig = UncheckedRequest<BuildConfigs>;
pub type UncheckedRunBuild = UncheckedRequest<RunBuilds>;
