//! TeamCity REST entities
//!
//! Wire representations for the resources the harness creates. Optional
//! fields are omitted when `None` so partially filled payloads can probe the
//! server's validation; unknown response fields are ignored.

use crate::api::roles::{RoleId, RoleScope};
use serde::{Deserialize, Serialize};

/// Locator of the root project every generated project is parented at
pub const ROOT_PROJECT_LOCATOR: &str = "_Root";

/// TeamCity user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Roles>,
}

/// Collection of role assignments, serialized as `{"role": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub role: Vec<Role>,
}

/// A single role assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: RoleId,
    pub scope: RoleScope,
}

/// Project reference or project as returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Project {
    /// Reference to a project by locator
    pub fn with_locator(locator: impl Into<String>) -> Self {
        Self {
            locator: Some(locator.into()),
            ..Default::default()
        }
    }

    /// Reference to the root project
    pub fn root() -> Self {
        Self::with_locator(ROOT_PROJECT_LOCATOR)
    }
}

/// Payload for creating a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_all_associated_settings: Option<bool>,
}

impl NewProjectDescription {
    /// Reference to the project this payload describes
    pub fn as_reference(&self) -> Project {
        Project {
            // A locator is not an id; only a parent given by id is carried over
            parent_project_id: self.parent_project.as_ref().and_then(|p| p.id.clone()),
            id: self.id.clone(),
            locator: None,
            name: self.name.clone(),
        }
    }
}

/// Build configuration (`buildType` in the REST API)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Reference to a build configuration by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTypeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Build queue entry: the request payload and the server's answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunBuild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_type: Option<BuildTypeRef>,
    /// Assigned by the server when the build is queued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl RunBuild {
    /// Queue request for the given build configuration
    pub fn for_build_type(build_type_id: impl Into<String>) -> Self {
        Self {
            build_type: Some(BuildTypeRef {
                id: Some(build_type_id.into()),
            }),
            ..Default::default()
        }
    }
}

impl Roles {
    /// Single role assignment
    pub fn single(role_id: RoleId, scope: RoleScope) -> Self {
        Self {
            role: vec![Role { role_id, scope }],
        }
    }
}
