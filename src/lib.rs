//! TeamCity test harness
//!
//! Test-data isolation and request verification for end-to-end tests against
//! the TeamCity REST API.
//!
//! ## Pieces
//!
//! - **Generators** produce unique, cross-linked test entities
//! - **Specifications** describe who is calling (super user, a generated user, nobody)
//! - **Requests** come in two flavours: unchecked (raw status and body) and
//!   checked (HTTP 200 asserted, typed entity returned)
//! - **Storage** remembers generated data so teardown can delete it
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = load_config(None)?;
//! let specs = Specifications::new(&config.server)?;
//! let checked = CheckedRequests::new(specs.super_user_spec()?);
//! let unchecked = UncheckedRequests::new(specs.super_user_spec()?);
//!
//! let mut storage = TestDataStorage::new();
//! let data = storage
//!     .add_test_data()
//!     .with_roles(RoleId::SystemAdmin, RoleScope::Global);
//!
//! checked.users().create(&data.user).await?;
//! checked.projects().create(&data.project).await?;
//!
//! let created = CheckedRequests::new(specs.auth_spec(&data.user))
//!     .build_configs()
//!     .create(&data.build_type)
//!     .await?;
//! assert_eq!(created.id, data.build_type.id);
//!
//! storage.cleanup(&unchecked).await;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod generators;
pub mod requests;
pub mod storage;
pub mod util;

// Re-export main types
pub use api::{ApiResponse, RequestSpec, RoleId, RoleScope, Specifications};
pub use config::{HarnessConfig, load_config};
pub use error::{HarnessError, RequestError, Result};
pub use generators::{TestData, TestDataGenerator};
pub use requests::{CheckedRequests, CrudRequest, UncheckedRequests};
pub use storage::{CleanupReport, TestDataStorage};
