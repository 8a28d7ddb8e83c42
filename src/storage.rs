//! Per-test registry of generated test data
//!
//! Every [`TestData`] handed out is remembered so teardown can remove what the
//! test created. Cleanup is advisory: failures are logged and counted but
//! never returned, so they cannot mask the test's own result.

use crate::generators::{TestData, TestDataGenerator};
use crate::requests::{CrudRequest, UncheckedRequests};
use tracing::{debug, warn};

/// Outcome of a cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Delete calls issued
    pub attempted: usize,
    /// Delete calls that errored or answered non-2xx
    pub failed: usize,
}

/// Test data created during one test
#[derive(Debug, Default)]
pub struct TestDataStorage {
    entries: Vec<TestData>,
}

impl TestDataStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new test data model, remember it and return a copy
    pub fn add_test_data(&mut self) -> TestData {
        let data = TestDataGenerator::generate();
        self.entries.push(data.clone());
        data
    }

    /// Models generated so far, in creation order
    pub fn entries(&self) -> &[TestData] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delete everything the stored models may have created.
    ///
    /// Walks newest first. The project goes before the user; deleting a
    /// project removes its build configurations with it.
    pub async fn cleanup(&mut self, requests: &UncheckedRequests) -> CleanupReport {
        let mut report = CleanupReport::default();

        for data in self.entries.drain(..).rev() {
            if let Some(project_id) = data.project.id.as_deref() {
                report.attempted += 1;
                if !delete_quietly(requests.projects(), "project", project_id).await {
                    report.failed += 1;
                }
            }

            if !data.user.username.is_empty() {
                report.attempted += 1;
                if !delete_quietly(requests.users(), "user", &data.user.username).await {
                    report.failed += 1;
                }
            }
        }

        debug!(
            attempted = report.attempted,
            failed = report.failed,
            "Test data cleanup finished"
        );

        report
    }
}

/// Issue a delete and swallow the outcome; true when the server answered 2xx
async fn delete_quietly<C>(request: &C, kind: &'static str, id: &str) -> bool
where
    C: CrudRequest<Deleted = crate::api::ApiResponse>,
{
    match request.delete(id).await {
        Ok(response) if response.is_success() => true,
        Ok(response) => {
            // Entities a test never created answer 404 here
            debug!(
                kind,
                id,
                status = response.status(),
                "Cleanup delete not applied"
            );
            false
        }
        Err(e) => {
            warn!(kind, id, error = %e, "Cleanup delete failed");
            false
        }
    }
}
