//! Error texts TeamCity returns for rejected requests.

use std::fmt;

/// Literal body of every 401 response
pub const AUTHENTICATION_REQUIRED: &str =
    "Authentication required\nTo login manually go to \"/login.html\" page";

/// Fixed error fragments the server embeds in 4xx bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorMessage {
    EmptyProjectName,
    CreateSubprojectPermission,
    ProjectNotSpecified,
    EditProjectPermission,
    MissingProjectNode,
    MissingBuildTypeName,
}

impl ApiErrorMessage {
    pub fn text(&self) -> &'static str {
        match self {
            ApiErrorMessage::EmptyProjectName => "Project name cannot be empty.",
            ApiErrorMessage::CreateSubprojectPermission => {
                "You do not have \"Create subproject\" permission in project with internal id: _Root"
            }
            ApiErrorMessage::ProjectNotSpecified => {
                "No project specified. Either 'id', 'internalId' or 'locator' attribute should be present."
            }
            ApiErrorMessage::EditProjectPermission => {
                "You do not have enough permissions to edit project with id: "
            }
            ApiErrorMessage::MissingProjectNode => {
                "Build type creation request should contain project node."
            }
            ApiErrorMessage::MissingBuildTypeName => {
                "When creating a build type, non empty name should be provided."
            }
        }
    }
}

impl fmt::Display for ApiErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Permission error for editing a specific project
pub fn edit_project_permission(project_id: &str) -> String {
    format!("{}{}", ApiErrorMessage::EditProjectPermission.text(), project_id)
}

pub fn duplicate_project_name(name: &str) -> String {
    format!("Project with this name already exists: {}", name)
}

pub fn duplicate_build_type_id(id: &str) -> String {
    format!(
        "The build configuration / template ID \"{}\" is already used by another configuration or template",
        id
    )
}

pub fn project_not_found_by_locator(id: &str) -> String {
    format!("No project found by locator 'count:1,id:{}'", id)
}

pub fn project_not_found_by_external_id(id: &str) -> String {
    format!("Project cannot be found by external id '{}'.", id)
}

pub fn build_type_not_found(id: &str) -> String {
    format!("No build type nor template is found by id '{}'.", id)
}

/// Rejection for parent locators that match nothing
pub const PARENT_PROJECT_NOT_FOUND: &str = "No project found by name or internal/external id";

/// Rejection for ids over the length ceiling
pub const INVALID_ID: &str = "ID should start with a latin letter and contain only latin letters, digits and underscores (at most 225 characters)";
