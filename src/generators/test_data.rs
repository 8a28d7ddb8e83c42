//! Test data model and its generator.

use crate::api::models::{BuildType, NewProjectDescription, Project, Roles, RunBuild, User};
use crate::api::roles::{RoleId, RoleScope};
use crate::error::ScopeError;
use crate::generators::random::random_string;
use serde::Serialize;

/// One self-consistent set of entities for a single test scenario
///
/// The build configuration points at `project`, and `run_build` points at
/// `build_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    pub user: User,
    pub project: NewProjectDescription,
    pub build_type: BuildType,
    pub run_build: RunBuild,
}

impl TestData {
    /// Replace the user's roles with a single grant
    pub fn with_roles(mut self, role: RoleId, scope: RoleScope) -> Self {
        self.user.roles = Some(TestDataGenerator::generate_roles(role, scope));
        self
    }

    /// Id of the generated project
    pub fn project_id(&self) -> &str {
        self.project.id.as_deref().unwrap_or_default()
    }

    /// Id of the generated build configuration
    pub fn build_type_id(&self) -> &str {
        self.build_type.id.as_deref().unwrap_or_default()
    }

    /// Scope covering only the generated project
    ///
    /// Fails when the project id was replaced by one TeamCity would reject.
    pub fn project_scope(&self) -> Result<RoleScope, ScopeError> {
        RoleScope::project(self.project_id())
    }
}

/// Builds [`TestData`] from random names
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// Generate a fully wired test data model; the user has no roles yet.
    pub fn generate() -> TestData {
        let user = User {
            username: random_string(),
            password: random_string(),
            email: format!("{}@gmail.com", random_string()),
            roles: None,
        };

        let project = NewProjectDescription {
            parent_project: Some(Project::root()),
            name: Some(random_string()),
            id: Some(random_string()),
            copy_all_associated_settings: Some(true),
        };

        let build_type = BuildType {
            id: Some(random_string()),
            name: Some(random_string()),
            project: Some(project.as_reference()),
        };

        let run_build = RunBuild::for_build_type(build_type.id.clone().unwrap_or_default());

        TestData {
            user,
            project,
            build_type,
            run_build,
        }
    }

    /// Single role assignment for `role` at `scope`
    pub fn generate_roles(role: RoleId, scope: RoleScope) -> Roles {
        Roles::single(role, scope)
    }
}
