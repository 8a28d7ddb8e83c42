//! Test data generation
//!
//! Random names plus the generator that wires them into a consistent
//! [`TestData`] bundle.

pub mod random;
pub mod test_data;

pub use random::{long_string, random_string};
pub use test_data::{TestData, TestDataGenerator};
