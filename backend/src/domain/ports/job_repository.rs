//! Port abstraction for job persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{JobDraft, JobPatch, JobTags, JobTagsPatch, JobWithTags};

/// Persistence errors raised by job repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobPersistenceError {
    /// Repository connection could not be established.
    #[error("job repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("job repository query failed: {message}")]
    Query { message: String },
}

impl JobPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage operations over jobs, their tag entities, and the link tables.
///
/// Every mutating operation runs in a single transaction: the job row, any
/// resolved or created tag entities, and the link rows commit or roll back
/// together. Skills and benefits are resolved find-or-create by name;
/// requirements are always created fresh.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Persist a new job with its tag sets and return it eagerly loaded.
    async fn create_job(
        &self,
        draft: &JobDraft,
        tags: &JobTags,
    ) -> Result<JobWithTags, JobPersistenceError>;

    /// Reuse the job matching `(title, company, location)` or create it, then
    /// fully replace all three link sets. Scalar fields of a reused job are
    /// left untouched.
    async fn upsert_job(
        &self,
        draft: &JobDraft,
        tags: &JobTags,
    ) -> Result<JobWithTags, JobPersistenceError>;

    /// All jobs with their tag sets.
    async fn list_jobs(&self) -> Result<Vec<JobWithTags>, JobPersistenceError>;

    /// One job with its tag sets, or `None` if absent.
    async fn find_job(&self, id: Uuid) -> Result<Option<JobWithTags>, JobPersistenceError>;

    /// Apply a partial update. Present scalar fields overwrite; present tag
    /// lists fully replace the corresponding link set. Returns `None` if the
    /// job does not exist.
    async fn update_job(
        &self,
        id: Uuid,
        patch: &JobPatch,
        tags: &JobTagsPatch,
    ) -> Result<Option<JobWithTags>, JobPersistenceError>;

    /// Clear the job's link sets and delete the job row. Tag entities are
    /// never cascaded. Returns `false` if the job does not exist.
    async fn delete_job(&self, id: Uuid) -> Result<bool, JobPersistenceError>;
}
