//! Persistence seam for completed audit runs.

use thiserror::Error;

use super::domain::{AuditKey, AuditResult};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("audit repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage backend for audit results, keyed by user and entity.
///
/// Implementations keep one history per key with the newest run first;
/// `latest` is the head of that history and `history` returns at most
/// `limit` entries in the same order.
pub trait AuditRepository: Send + Sync {
    fn store(&self, result: AuditResult) -> Result<(), RepositoryError>;

    fn latest(&self, key: &AuditKey) -> Result<Option<AuditResult>, RepositoryError>;

    fn history(&self, key: &AuditKey, limit: usize) -> Result<Vec<AuditResult>, RepositoryError>;
}
