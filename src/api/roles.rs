//! Role identifiers and role scopes
//!
//! TeamCity grants a role either globally (`g`) or within a project
//! (`p:<projectId>`). Both halves are validated when they are built, so a
//! malformed grant never reaches the server.

use crate::error::ScopeError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Longest external id TeamCity accepts for projects and build configurations
pub const MAX_ID_LENGTH: usize = 225;

/// External id rule: latin letter first, then latin letters, digits and underscores
static EXTERNAL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[A-Za-z][A-Za-z0-9_]{{0,{}}}$", MAX_ID_LENGTH - 1))
        .expect("external id pattern is valid")
});

/// Whether `id` is a valid TeamCity external id
pub fn is_valid_external_id(id: &str) -> bool {
    EXTERNAL_ID.is_match(id)
}

/// Built-in TeamCity roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleId {
    SystemAdmin,
    ProjectAdmin,
    ProjectViewer,
    ProjectDeveloper,
    AgentManager,
    ToolsIntegration,
}

impl RoleId {
    /// Every built-in role
    pub const ALL: [RoleId; 6] = [
        RoleId::SystemAdmin,
        RoleId::ProjectAdmin,
        RoleId::ProjectViewer,
        RoleId::ProjectDeveloper,
        RoleId::AgentManager,
        RoleId::ToolsIntegration,
    ];

    /// Role id as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleId::SystemAdmin => "SYSTEM_ADMIN",
            RoleId::ProjectAdmin => "PROJECT_ADMIN",
            RoleId::ProjectViewer => "PROJECT_VIEWER",
            RoleId::ProjectDeveloper => "PROJECT_DEVELOPER",
            RoleId::AgentManager => "AGENT_MANAGER",
            RoleId::ToolsIntegration => "TOOLS_INTEGRATION",
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleId {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleId::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ScopeError::UnknownRole(s.to_string()))
    }
}

impl Serialize for RoleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Project id inside a project scope; only built through [`RoleScope::project`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedProjectId(String);

impl ScopedProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a role applies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleScope {
    /// Server-wide grant, `g` on the wire
    Global,
    /// Grant within one project, `p:<projectId>` on the wire
    Project(ScopedProjectId),
}

impl RoleScope {
    /// Project scope, validating the project id
    pub fn project(project_id: impl Into<String>) -> Result<Self, ScopeError> {
        let project_id = project_id.into();
        if is_valid_external_id(&project_id) {
            Ok(RoleScope::Project(ScopedProjectId(project_id)))
        } else {
            Err(ScopeError::InvalidScope(format!("p:{}", project_id)))
        }
    }

    /// Project the grant is limited to, if any
    pub fn project_id(&self) -> Option<&str> {
        match self {
            RoleScope::Global => None,
            RoleScope::Project(id) => Some(id.as_str()),
        }
    }

    /// Scope token as sent on the wire
    pub fn token(&self) -> String {
        match self {
            RoleScope::Global => "g".to_string(),
            RoleScope::Project(id) => format!("p:{}", id.as_str()),
        }
    }
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for RoleScope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(RoleScope::Global),
            _ => match s.strip_prefix("p:") {
                Some(id) => RoleScope::project(id),
                None => Err(ScopeError::InvalidScope(s.to_string())),
            },
        }
    }
}

impl Serialize for RoleScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for RoleScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
