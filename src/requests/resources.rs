//! Resource descriptors
//!
//! One marker type per REST resource. The descriptor knows the endpoint,
//! how to address a single entity and which operations the server offers;
//! the generic request types do the rest.

use crate::api::models::{BuildType, NewProjectDescription, Project, RunBuild, User};
use crate::util::encode_locator;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// CRUD operation names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a REST resource
pub trait Resource: Send + Sync + 'static {
    /// Human-readable name used in errors and logs
    const NAME: &'static str;
    /// Collection endpoint, e.g. `/app/rest/projects`
    const ENDPOINT: &'static str;
    /// Locator dimension used to address one entity (`id`, `username`)
    const LOCATOR: &'static str;

    /// Body sent on create and update
    type Payload: Serialize + Send + Sync;
    /// Entity returned by the server
    type Model: DeserializeOwned + Send;

    /// Whether the server offers this operation
    fn supports(operation: Operation) -> bool;

    /// Path of one entity, e.g. `/app/rest/projects/id:MyProject`
    fn entity_path(id: &str) -> String {
        format!("{}/{}:{}", Self::ENDPOINT, Self::LOCATOR, encode_locator(id))
    }
}

/// `/app/rest/users`, addressed by username
pub struct Users;

impl Resource for Users {
    const NAME: &'static str = "user";
    const ENDPOINT: &'static str = "/app/rest/users";
    const LOCATOR: &'static str = "username";

    type Payload = User;
    type Model = User;

    fn supports(_operation: Operation) -> bool {
        true
    }
}

/// `/app/rest/projects`
pub struct Projects;

impl Resource for Projects {
    const NAME: &'static str = "project";
    const ENDPOINT: &'static str = "/app/rest/projects";
    const LOCATOR: &'static str = "id";

    type Payload = NewProjectDescription;
    type Model = Project;

    fn supports(operation: Operation) -> bool {
        operation != Operation::Update
    }
}

/// `/app/rest/buildTypes`
pub struct BuildConfigs;

impl Resource for BuildConfigs {
    const NAME: &'static str = "build configuration";
    const ENDPOINT: &'static str = "/app/rest/buildTypes";
    const LOCATOR: &'static str = "id";

    type Payload = BuildType;
    type Model = BuildType;

    fn supports(operation: Operation) -> bool {
        operation != Operation::Update
    }
}

/// `/app/rest/buildQueue`; only enqueue and cancel
pub struct RunBuilds;

impl Resource for RunBuilds {
    const NAME: &'static str = "run build";
    const ENDPOINT: &'static str = "/app/rest/buildQueue";
    const LOCATOR: &'static str = "id";

    type Payload = RunBuild;
    type Model = RunBuild;

    fn supports(operation: Operation) -> bool {
        matches!(operation, Operation::Create | Operation::Delete)
    }
}
