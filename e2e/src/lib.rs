//! End-to-end test framework for teamcity-harness.
//!
//! Runs scenarios against a live TeamCity server. Every test generates its own
//! data through [`TestContext`], acts as the super user or as a generated
//! user, and deletes what it created on cleanup.
//!
//! Tests skip themselves when no server is configured (`TEAMCITY_URL` or
//! `TEAMCITY_HARNESS__SERVER__URL` unset).
//!
//! # Usage
//!
//! ```rust,ignore
//! use teamcity_harness::{CrudRequest, RoleId};
//! use teamcity_harness_e2e::TestContextBuilder;
//!
//! #[tokio::test]
//! async fn test_create_project() {
//!     let Some(ctx) = TestContextBuilder::new()
//!         .with_global_user(RoleId::SystemAdmin)
//!         .build()
//!         .await
//!         .unwrap()
//!     else {
//!         return;
//!     };
//!
//!     let project = ctx.checked_as_user().projects().create(&ctx.data.project).await.unwrap();
//!     assert_eq!(project.id, ctx.data.project.id);
//!
//!     ctx.cleanup().await.unwrap();
//! }
//! ```

pub mod context;

pub use context::{TestContext, TestContextBuilder};
