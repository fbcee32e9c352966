//! Audit orchestration.
//!
//! A run moves through credit admission, signal fetch and validation, the
//! review analyzer, the category scorers, aggregation, and finally the
//! repository. Any failure after admission aborts the run without
//! persisting, so a stored "latest" is always a complete result.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{info, warn};

use crate::config::AuditConfig;

use super::aggregate;
use super::domain::{AuditKey, AuditResult, Category, UserId};
use super::insights::InsightPoint;
use super::recommend;
use super::repository::{AuditRepository, RepositoryError};
use super::reviews;
use super::scoring;
use super::signals::{AuditSignals, SignalError};

/// Source of normalized listing signals for one audited entity.
pub trait SignalProvider: Send + Sync {
    fn fetch(&self, key: &AuditKey) -> Result<AuditSignals, SignalError>;
}

/// Account balance consulted before a run is admitted. The auditor only
/// compares the balance to the per-run cost; it never debits.
pub trait CreditLedger: Send + Sync {
    fn balance(&self, user_id: &UserId) -> Result<u32, CreditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CreditError {
    #[error("insufficient credit: balance {balance} is below the run cost of {required}")]
    InsufficientBalance { balance: u32, required: u32 },
    #[error("credit ledger unavailable: {0}")]
    Unavailable(String),
}

/// Error raised by the audit service.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Credit(#[from] CreditError),
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error("analysis failed during {stage}")]
    Analysis { stage: &'static str },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing the signal provider, credit ledger, and repository.
pub struct AuditService<P, R, L> {
    signals: Arc<P>,
    repository: Arc<R>,
    ledger: Arc<L>,
    config: AuditConfig,
    run_locks: Mutex<HashMap<AuditKey, Arc<Mutex<()>>>>,
}

static AUDIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_audit_id() -> String {
    let id = AUDIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("audit-{id:06}")
}

impl<P, R, L> AuditService<P, R, L>
where
    P: SignalProvider + 'static,
    R: AuditRepository + 'static,
    L: CreditLedger + 'static,
{
    pub fn new(signals: Arc<P>, repository: Arc<R>, ledger: Arc<L>, config: AuditConfig) -> Self {
        Self {
            signals,
            repository,
            ledger,
            config,
            run_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run a fresh audit and persist it as the newest record for the key.
    pub fn run_audit(&self, key: &AuditKey) -> Result<AuditResult, AuditError> {
        self.admit(&key.user_id)?;

        let run_lock = self.key_lock(key);
        let _serialized = run_lock.lock().expect("audit run lock poisoned");
        self.execute_and_store(key)
    }

    /// Latest stored audit for the key, running one first on a miss.
    ///
    /// Concurrent misses for the same key serialize on a per-key lock and
    /// re-check the store after acquiring it, so exactly one run happens.
    pub fn latest_audit(&self, key: &AuditKey) -> Result<AuditResult, AuditError> {
        if let Some(existing) = self.repository.latest(key)? {
            return Ok(existing);
        }

        self.admit(&key.user_id)?;

        let run_lock = self.key_lock(key);
        let _serialized = run_lock.lock().expect("audit run lock poisoned");
        if let Some(existing) = self.repository.latest(key)? {
            return Ok(existing);
        }
        self.execute_and_store(key)
    }

    /// Stored history reduced to chartable points, newest first.
    pub fn insights(&self, key: &AuditKey) -> Result<Vec<InsightPoint>, AuditError> {
        let history = self
            .repository
            .history(key, self.config.insight_history_limit)?;
        Ok(history.iter().map(InsightPoint::from).collect())
    }

    fn admit(&self, user_id: &UserId) -> Result<(), CreditError> {
        let balance = self.ledger.balance(user_id)?;
        if balance < self.config.run_cost {
            return Err(CreditError::InsufficientBalance {
                balance,
                required: self.config.run_cost,
            });
        }
        Ok(())
    }

    fn key_lock(&self, key: &AuditKey) -> Arc<Mutex<()>> {
        let mut locks = self.run_locks.lock().expect("audit lock map poisoned");
        locks.entry(key.clone()).or_default().clone()
    }

    fn execute_and_store(&self, key: &AuditKey) -> Result<AuditResult, AuditError> {
        let result = match self.execute_run(key) {
            Ok(result) => result,
            Err(error) => {
                warn!(
                    user_id = %key.user_id,
                    entity_id = %key.entity_id,
                    %error,
                    "audit run failed"
                );
                return Err(error);
            }
        };

        self.repository.store(result.clone())?;
        info!(
            audit_id = %result.audit_id,
            entity_id = %result.entity_id,
            overall_score = result.overall_score,
            "audit stored"
        );
        Ok(result)
    }

    fn execute_run(&self, key: &AuditKey) -> Result<AuditResult, AuditError> {
        let signals = self.signals.fetch(key)?;
        signals.validate()?;

        let timestamp = Utc::now();
        let analysis = reviews::analyze(&signals.reviews, timestamp);
        let categories = scoring::score_all(&signals, &analysis, timestamp);

        let category_scores: BTreeMap<Category, u8> = categories
            .iter()
            .map(|scored| (scored.category, scored.score))
            .collect();
        let (overall_score, weight_profile) =
            aggregate::overall_score(&category_scores).ok_or(AuditError::Analysis {
                stage: "aggregation",
            })?;
        let recommendations = recommend::synthesize(&categories);
        let business_info_checks = categories
            .iter()
            .find(|scored| scored.category == Category::BusinessInfo)
            .map(|scored| scored.checks.clone())
            .unwrap_or_default();

        Ok(AuditResult {
            audit_id: next_audit_id(),
            user_id: key.user_id.clone(),
            entity_id: key.entity_id.clone(),
            timestamp,
            overall_score,
            weight_profile,
            category_scores,
            categories,
            recommendations,
            business_info_checks,
            review_summary: analysis.summary,
        })
    }
}
