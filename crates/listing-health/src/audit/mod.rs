//! Listing health audits: review analysis, category scoring, weighted
//! aggregation, and the run/store orchestration around them.
//!
//! The pipeline is deterministic given the fetched signals. One run
//! produces one immutable [`AuditResult`]; re-running produces a new
//! record rather than mutating the stored one.

pub mod aggregate;
pub mod domain;
pub mod import;
pub mod insights;
pub(crate) mod recommend;
pub mod repository;
pub mod reviews;
pub mod router;
pub(crate) mod scoring;
pub mod service;
pub mod signals;

#[cfg(test)]
mod tests;

pub use aggregate::WeightProfile;
pub use domain::{
    AuditKey, AuditResult, Category, CategoryCheck, CategoryScoreResult, CheckStatus, EntityId,
    Priority, Recommendation, UserId,
};
pub use import::{ReviewCsvImporter, ReviewImportError};
pub use insights::{AuditTrend, CategoryMovement, InsightPoint, TrendDirection};
pub use repository::{AuditRepository, RepositoryError};
pub use reviews::{ReviewAnalysis, ReviewSetSummary, SentimentLabel, SpamFlag};
pub use router::audit_router;
pub use service::{AuditError, AuditService, CreditError, CreditLedger, SignalProvider};
pub use signals::{
    AuditSignals, BusinessAttributes, NormalizedBusinessInfo, NormalizedCompetitor,
    NormalizedDuplicateListing, NormalizedKeywordUsage, NormalizedPerformance,
    NormalizedPhotoAudit, NormalizedPost, NormalizedQna, NormalizedReview, PerformanceMetric,
    PostEnrichment, SignalError, UpstreamAdvice,
};
