use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::audit::domain::{AuditKey, AuditResult, UserId};
use crate::audit::repository::{AuditRepository, RepositoryError};
use crate::audit::router::audit_router;
use crate::audit::service::{AuditService, CreditError, CreditLedger, SignalProvider};
use crate::audit::signals::{
    AuditSignals, BusinessAttributes, NormalizedBusinessInfo, NormalizedCompetitor,
    NormalizedDuplicateListing, NormalizedKeywordUsage, NormalizedPerformance,
    NormalizedPhotoAudit, NormalizedPost, NormalizedQna, NormalizedReview, PerformanceMetric,
    PostEnrichment, SignalError, UpstreamAdvice,
};
use crate::config::AuditConfig;

pub(super) fn run_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0)
        .single()
        .expect("valid clock")
}

pub(super) fn review(
    base: DateTime<Utc>,
    id: &str,
    rating: u8,
    comment: &str,
    days_ago: i64,
    replied_hours_after: Option<i64>,
) -> NormalizedReview {
    let created_at = base - Duration::days(days_ago);
    NormalizedReview {
        review_id: id.to_string(),
        reviewer: format!("Reviewer {id}"),
        rating,
        comment: comment.to_string(),
        created_at,
        replied_at: replied_hours_after.map(|hours| created_at + Duration::hours(hours)),
    }
}

/// Four reviews averaging exactly 4.0 with a 50% response rate: one fast
/// reply, one slow reply, one stale unreplied complaint, one fresh rave.
pub(super) fn review_set(base: DateTime<Utc>) -> Vec<NormalizedReview> {
    vec![
        review(
            base,
            "rev-1",
            5,
            "Excellent espresso and friendly helpful staff",
            20,
            Some(24),
        ),
        review(
            base,
            "rev-2",
            4,
            "Good espresso, quick stop before work",
            15,
            Some(120),
        ),
        review(
            base,
            "rev-3",
            2,
            "Slow service and rude staff on a busy day",
            10,
            None,
        ),
        review(
            base,
            "rev-4",
            5,
            "Fantastic espresso and a clean cozy room",
            2,
            None,
        ),
    ]
}

pub(super) fn business(base: DateTime<Utc>) -> NormalizedBusinessInfo {
    NormalizedBusinessInfo {
        name: "Juniper Cafe".to_string(),
        address: "12 Elm St".to_string(),
        phone: "515-555-0101".to_string(),
        description: "Espresso bar and bakery serving single-origin coffee. "
            .repeat(16)
            .trim_end()
            .to_string(),
        website: Some("https://junipercafe.example".to_string()),
        photo_count: 14,
        hours_updated_at: Some(base - Duration::days(10)),
    }
}

pub(super) fn attributes() -> BusinessAttributes {
    BusinessAttributes {
        name_matches_storefront: true,
        categories_relevant: true,
        services_complete: true,
        has_identity_attributes: true,
        description_mentions_keywords: true,
        opening_date: chrono::NaiveDate::from_ymd_opt(2019, 4, 1),
        has_local_phone: true,
        has_chat_enabled: true,
        website_links_match: true,
        social_profiles_consistent: true,
        location_pin_accurate: true,
        hours_complete: true,
        has_special_hours: true,
        video_count: 2,
        has_virtual_tour: true,
        nap_consistent: true,
    }
}

/// Six posts across the cadence window, photos on the newest four.
pub(super) fn posts(base: DateTime<Utc>) -> Vec<NormalizedPost> {
    [(10, true), (17, true), (24, true), (31, true), (38, false), (45, false)]
        .iter()
        .enumerate()
        .map(|(index, (days_ago, has_photo))| NormalizedPost {
            post_id: format!("post-{}", index + 1),
            summary: format!("Update {}", index + 1),
            created_at: base - Duration::days(*days_ago),
            has_photo: *has_photo,
        })
        .collect()
}

/// Two rivals whose means land exactly on the fixture listing's own
/// numbers: 4 reviews, a 4.0 rating, and 6 posts.
pub(super) fn competitors() -> Vec<NormalizedCompetitor> {
    vec![
        NormalizedCompetitor {
            name: "Rival Coffee".to_string(),
            review_count: 8,
            avg_rating: 4.0,
            post_count: 4,
        },
        NormalizedCompetitor {
            name: "Corner Beans".to_string(),
            review_count: 0,
            avg_rating: 4.0,
            post_count: 8,
        },
    ]
}

/// Core inputs only: the four always-audited categories.
pub(super) fn core_signals(base: DateTime<Utc>) -> AuditSignals {
    AuditSignals {
        business: business(base),
        reviews: review_set(base),
        posts: posts(base),
        competitors: competitors(),
        post_enrichment: None,
        attributes: None,
        performance: None,
        photos: None,
        qna: None,
        keywords: None,
        duplicates: None,
    }
}

/// Every optional block populated, switching all ten categories on.
pub(super) fn full_signals(base: DateTime<Utc>) -> AuditSignals {
    let above_benchmark = PerformanceMetric {
        value: 120.0,
        benchmark: 100.0,
        change_pct: 0.0,
    };
    AuditSignals {
        post_enrichment: Some(PostEnrichment {
            keyword_coverage_pct: 85.0,
        }),
        attributes: Some(attributes()),
        performance: Some(NormalizedPerformance {
            total_interactions: above_benchmark,
            calls: above_benchmark,
            bookings: above_benchmark,
            direction_requests: above_benchmark,
            website_clicks: above_benchmark,
            messages: above_benchmark,
            searches: above_benchmark,
        }),
        photos: Some(NormalizedPhotoAudit {
            coverage_score: 73,
            advice: vec![UpstreamAdvice {
                description: "No photos of the patio seating".to_string(),
                action: "Add exterior photos covering the patio".to_string(),
                impact: "Exterior shots help customers recognize the entrance".to_string(),
            }],
        }),
        qna: Some(NormalizedQna {
            total: 8,
            unanswered: 2,
            advice: Vec::new(),
        }),
        keywords: Some(NormalizedKeywordUsage {
            description_usage: 1,
            posts_usage: 1,
            reviews_usage: 1,
            missing_keywords: vec!["cold brew".to_string()],
        }),
        duplicates: Some(vec![NormalizedDuplicateListing {
            listing_name: "Juniper Cafe LLC".to_string(),
            address: "12 Elm St".to_string(),
            source: "city directory".to_string(),
        }]),
        ..core_signals(base)
    }
}

pub(super) fn key() -> AuditKey {
    AuditKey::new("user-1", "listing-1")
}

pub(super) fn build_service(
    signals: AuditSignals,
) -> (
    AuditService<FixedSignalProvider, MemoryRepository, MemoryLedger>,
    Arc<FixedSignalProvider>,
    Arc<MemoryRepository>,
    Arc<MemoryLedger>,
) {
    let provider = Arc::new(FixedSignalProvider::new(signals));
    let repository = Arc::new(MemoryRepository::default());
    let ledger = Arc::new(MemoryLedger::default());
    ledger.grant("user-1", 10);
    let service = AuditService::new(
        provider.clone(),
        repository.clone(),
        ledger.clone(),
        AuditConfig::default(),
    );
    (service, provider, repository, ledger)
}

pub(super) fn audit_router_with_service(
    service: AuditService<FixedSignalProvider, MemoryRepository, MemoryLedger>,
) -> axum::Router {
    audit_router(Arc::new(service))
}

#[derive(Clone)]
pub(super) struct FixedSignalProvider {
    signals: AuditSignals,
    fetches: Arc<AtomicU32>,
}

impl FixedSignalProvider {
    pub(super) fn new(signals: AuditSignals) -> Self {
        Self {
            signals,
            fetches: Arc::new(AtomicU32::new(0)),
        }
    }

    pub(super) fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SignalProvider for FixedSignalProvider {
    fn fetch(&self, _key: &AuditKey) -> Result<AuditSignals, SignalError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.signals.clone())
    }
}

pub(super) struct UnavailableSignalProvider;

impl SignalProvider for UnavailableSignalProvider {
    fn fetch(&self, _key: &AuditKey) -> Result<AuditSignals, SignalError> {
        Err(SignalError::Unavailable("signal source offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    runs: Arc<Mutex<HashMap<AuditKey, Vec<AuditResult>>>>,
}

impl MemoryRepository {
    pub(super) fn stored_runs(&self, key: &AuditKey) -> usize {
        let guard = self.runs.lock().expect("repository mutex poisoned");
        guard.get(key).map_or(0, Vec::len)
    }
}

impl AuditRepository for MemoryRepository {
    fn store(&self, result: AuditResult) -> Result<(), RepositoryError> {
        let mut guard = self.runs.lock().expect("repository mutex poisoned");
        guard.entry(result.key()).or_default().insert(0, result);
        Ok(())
    }

    fn latest(&self, key: &AuditKey) -> Result<Option<AuditResult>, RepositoryError> {
        let guard = self.runs.lock().expect("repository mutex poisoned");
        Ok(guard.get(key).and_then(|runs| runs.first().cloned()))
    }

    fn history(&self, key: &AuditKey, limit: usize) -> Result<Vec<AuditResult>, RepositoryError> {
        let guard = self.runs.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(key)
            .map(|runs| runs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl AuditRepository for UnavailableRepository {
    fn store(&self, _result: AuditResult) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(&self, _key: &AuditKey) -> Result<Option<AuditResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _key: &AuditKey, _limit: usize) -> Result<Vec<AuditResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    balances: Arc<Mutex<HashMap<UserId, u32>>>,
}

impl MemoryLedger {
    pub(super) fn grant(&self, user_id: &str, amount: u32) {
        let mut guard = self.balances.lock().expect("ledger mutex poisoned");
        guard.insert(UserId(user_id.to_string()), amount);
    }
}

impl CreditLedger for MemoryLedger {
    fn balance(&self, user_id: &UserId) -> Result<u32, CreditError> {
        let guard = self.balances.lock().expect("ledger mutex poisoned");
        Ok(guard.get(user_id).copied().unwrap_or(0))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
