//! Test context for E2E tests.
//!
//! Provides a unified context that combines:
//! - request specifications for the configured server
//! - checked and unchecked requests acting as the super user
//! - per-test data storage, emptied on cleanup

use anyhow::{Context, Result};
use teamcity_harness::api::User;
use teamcity_harness::{
    CheckedRequests, CrudRequest, RoleId, RoleScope, Specifications, TestData, TestDataStorage,
    UncheckedRequests, load_config,
};

/// Variables that point the scenarios at a server
const SERVER_URL_VARS: &[&str] = &["TEAMCITY_URL", "TEAMCITY_HARNESS__SERVER__URL"];

/// Test context for E2E tests.
pub struct TestContext {
    /// Specification factory for the configured server.
    pub specs: Specifications,
    /// Checked requests as the super user.
    pub checked: CheckedRequests,
    /// Unchecked requests as the super user.
    pub unchecked: UncheckedRequests,
    /// Primary test data, generated on construction.
    pub data: TestData,
    storage: TestDataStorage,
}

impl TestContext {
    /// Create a context with one freshly generated test data model.
    ///
    /// Returns `None` when no server is configured, so callers can skip.
    pub async fn new() -> Result<Option<Self>> {
        if !SERVER_URL_VARS.iter().any(|v| std::env::var_os(v).is_some()) {
            tracing::info!("TeamCity server not configured, skipping test");
            return Ok(None);
        }

        let config = load_config(None).context("Failed to load harness configuration")?;
        let specs = Specifications::new(&config.server)?;

        Self::with_specs(specs).map(Some)
    }

    /// Create a context against the server `specs` points at.
    pub fn with_specs(specs: Specifications) -> Result<Self> {
        let super_user = specs
            .super_user_spec()
            .context("Super user token is required for E2E tests")?;

        let mut storage = TestDataStorage::new();
        let data = storage.add_test_data();

        Ok(Self {
            checked: CheckedRequests::new(super_user.clone()),
            unchecked: UncheckedRequests::new(super_user),
            specs,
            data,
            storage,
        })
    }

    /// Generate another test data model that is cleaned up with this context.
    pub fn add_test_data(&mut self) -> TestData {
        self.storage.add_test_data()
    }

    /// Checked requests authenticated as `user`.
    pub fn checked_as(&self, user: &User) -> CheckedRequests {
        CheckedRequests::new(self.specs.auth_spec(user))
    }

    /// Unchecked requests authenticated as `user`.
    pub fn unchecked_as(&self, user: &User) -> UncheckedRequests {
        UncheckedRequests::new(self.specs.auth_spec(user))
    }

    /// Checked requests authenticated as the primary user.
    pub fn checked_as_user(&self) -> CheckedRequests {
        self.checked_as(&self.data.user)
    }

    /// Unchecked requests authenticated as the primary user.
    pub fn unchecked_as_user(&self) -> UncheckedRequests {
        self.unchecked_as(&self.data.user)
    }

    /// Unchecked requests without credentials.
    pub fn unchecked_anonymous(&self) -> UncheckedRequests {
        UncheckedRequests::new(self.specs.unauth_spec())
    }

    /// Grant `role` to the primary user and create it as the super user.
    pub async fn create_user_with_role(&mut self, role: RoleId, scope: RoleScope) -> Result<User> {
        self.data = self.data.clone().with_roles(role, scope);

        let user = self
            .checked
            .users()
            .create(&self.data.user)
            .await
            .context("Failed to create test user")?;

        tracing::info!(username = %user.username, %role, "Created test user");
        Ok(user)
    }

    /// Create the primary project as the super user.
    pub async fn create_project(&self) -> Result<()> {
        let project = self
            .checked
            .projects()
            .create(&self.data.project)
            .await
            .context("Failed to create test project")?;

        tracing::info!(project = ?project.id, "Created test project");
        Ok(())
    }

    /// Create the primary build configuration as the super user.
    pub async fn create_build_config(&self) -> Result<()> {
        let build_type = self
            .checked
            .build_configs()
            .create(&self.data.build_type)
            .await
            .context("Failed to create test build configuration")?;

        tracing::info!(build_type = ?build_type.id, "Created test build configuration");
        Ok(())
    }

    /// Delete everything generated through this context.
    pub async fn cleanup(mut self) -> Result<()> {
        let report = self.storage.cleanup(&self.unchecked).await;
        if report.failed > 0 {
            tracing::info!(
                attempted = report.attempted,
                failed = report.failed,
                "Some test data was not deleted"
            );
        }
        Ok(())
    }
}

/// Which scope the primary user's role is granted at.
#[derive(Debug, Clone, Copy)]
enum UserScope {
    Global,
    Project,
}

/// Builder for TestContext with custom setup.
#[derive(Default)]
pub struct TestContextBuilder {
    create_project: bool,
    create_build_config: bool,
    user: Option<(RoleId, UserScope)>,
}

impl TestContextBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the primary project as the super user.
    pub fn with_project(mut self) -> Self {
        self.create_project = true;
        self
    }

    /// Create the primary project and its build configuration.
    pub fn with_build_config(mut self) -> Self {
        self.create_project = true;
        self.create_build_config = true;
        self
    }

    /// Create the primary user with `role` granted globally.
    pub fn with_global_user(mut self, role: RoleId) -> Self {
        self.user = Some((role, UserScope::Global));
        self
    }

    /// Create the primary user with `role` granted on the primary project.
    pub fn with_project_user(mut self, role: RoleId) -> Self {
        self.user = Some((role, UserScope::Project));
        self
    }

    /// Build the test context.
    ///
    /// Returns `None` when no server is configured.
    pub async fn build(self) -> Result<Option<TestContext>> {
        let Some(ctx) = TestContext::new().await? else {
            return Ok(None);
        };

        self.prepare(ctx).await.map(Some)
    }

    /// Run the requested setup on `ctx`.
    ///
    /// A failed step deletes whatever the earlier steps created.
    pub async fn prepare(self, mut ctx: TestContext) -> Result<TestContext> {
        match self.run_setup(&mut ctx).await {
            Ok(()) => Ok(ctx),
            Err(e) => {
                ctx.cleanup().await?;
                Err(e)
            }
        }
    }

    async fn run_setup(&self, ctx: &mut TestContext) -> Result<()> {
        if self.create_project {
            ctx.create_project().await?;
        }
        if self.create_build_config {
            ctx.create_build_config().await?;
        }

        if let Some((role, scope)) = self.user {
            let scope = match scope {
                UserScope::Global => RoleScope::Global,
                UserScope::Project => ctx.data.project_scope()?,
            };
            ctx.create_user_with_role(role, scope).await?;
        }

        Ok(())
    }
}
