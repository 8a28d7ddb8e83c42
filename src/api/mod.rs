//! TeamCity REST API module
//!
//! Wire entities, role scopes, request specifications and the transport
//! every request layer goes through.

pub mod client;
pub mod messages;
pub mod models;
pub mod roles;
pub mod spec;

pub use client::{ApiResponse, RequestSpec};
pub use messages::ApiErrorMessage;
pub use models::*;
pub use roles::{RoleId, RoleScope};
pub use spec::{Credentials, Specifications};
