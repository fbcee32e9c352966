use chrono::{Duration, Utc};
use listing_health::audit::signals::{
    AuditSignals, BusinessAttributes, NormalizedBusinessInfo, NormalizedCompetitor,
    NormalizedDuplicateListing, NormalizedKeywordUsage, NormalizedPerformance,
    NormalizedPhotoAudit, NormalizedPost, NormalizedQna, NormalizedReview, PerformanceMetric,
    PostEnrichment, SignalError, UpstreamAdvice,
};
use listing_health::audit::{
    AuditKey, AuditRepository, AuditResult, CreditError, CreditLedger, RepositoryError,
    SignalProvider, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Credits every account starts with on the in-memory ledger.
pub(crate) const SEED_CREDITS: u32 = 10;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditRepository {
    runs: Arc<Mutex<HashMap<AuditKey, Vec<AuditResult>>>>,
}

impl AuditRepository for InMemoryAuditRepository {
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

/// Ledger that grants every account the same starting balance until an
/// explicit grant overrides it. The auditor never debits, so no spend
/// tracking is needed here.
#[derive(Clone)]
pub(crate) struct InMemoryCreditLedger {
    starting_balance: u32,
    balances: Arc<Mutex<HashMap<UserId, u32>>>,
}

impl InMemoryCreditLedger {
    pub(crate) fn new(starting_balance: u32) -> Self {
        Self {
            starting_balance,
            balances: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub(crate) fn grant(&self, user_id: &str, amount: u32) {
        let mut guard = self.balances.lock().expect("ledger mutex poisoned");
        guard.insert(UserId(user_id.to_string()), amount);
    }
}

impl CreditLedger for InMemoryCreditLedger {
    fn balance(&self, user_id: &UserId) -> Result<u32, CreditError> {
        let guard = self.balances.lock().expect("ledger mutex poisoned");
        Ok(guard
            .get(user_id)
            .copied()
            .unwrap_or(self.starting_balance))
    }
}

/// Serves one seeded signal snapshot for every audited key. Stands in for
/// the platform connectors so the service can be exercised end to end.
pub(crate) struct SeededSignalProvider {
    signals: AuditSignals,
}

impl SeededSignalProvider {
    pub(crate) fn new() -> Self {
        Self {
            signals: seeded_signals(None),
        }
    }

    /// Replace the seeded reviews with an imported set, keeping the rest
    /// of the snapshot.
    pub(crate) fn with_reviews(reviews: Vec<NormalizedReview>) -> Self {
        Self {
            signals: seeded_signals(Some(reviews)),
        }
    }
}

impl SignalProvider for SeededSignalProvider {
    fn fetch(&self, _key: &AuditKey) -> Result<AuditSignals, SignalError> {
        Ok(self.signals.clone())
    }
}

fn seeded_review(
    id: &str,
    rating: u8,
    comment: &str,
    days_ago: i64,
    replied_hours: Option<i64>,
) -> NormalizedReview {
    let created_at = Utc::now() - Duration::days(days_ago);
    NormalizedReview {
        review_id: id.to_string(),
        reviewer: format!("Reader {id}"),
        rating,
        comment: comment.to_string(),
        created_at,
        replied_at: replied_hours.map(|hours| created_at + Duration::hours(hours)),
    }
}

/// Demo snapshot for a bookstore listing with deliberate gaps: a thin
/// description, stale hours, patchy posting cadence, and a suspected
/// duplicate, so audits produce a meaningful remediation list.
pub(crate) fn seeded_signals(reviews: Option<Vec<NormalizedReview>>) -> AuditSignals {
    let now = Utc::now();

    let reviews = reviews.unwrap_or_else(|| {
        vec![
            seeded_review("bk-1", 5, "Wonderful selection and helpful staff", 12, Some(20)),
            seeded_review("bk-2", 4, "Cozy reading corner, good coffee", 25, None),
            seeded_review("bk-3", 3, "Decent selection but slow checkout", 40, None),
            seeded_review(
                "bk-4",
                5,
                "Excellent author events and friendly staff",
                6,
                Some(30),
            ),
            seeded_review("bk-5", 2, "Cramped aisles and rude clerk", 3, None),
        ]
    });

    AuditSignals {
        business: NormalizedBusinessInfo {
            name: "Harborline Books".to_string(),
            address: "48 Dock St".to_string(),
            phone: "555-0142".to_string(),
            description: "Independent bookstore on the harbor with new and used titles."
                .to_string(),
            website: Some("https://harborlinebooks.example".to_string()),
            photo_count: 6,
            hours_updated_at: Some(now - Duration::days(45)),
        },
        reviews,
        posts: vec![
            NormalizedPost {
                post_id: "post-1".to_string(),
                summary: "Staff picks for the summer".to_string(),
                created_at: now - Duration::days(20),
                has_photo: true,
            },
            NormalizedPost {
                post_id: "post-2".to_string(),
                summary: "Poetry night recap".to_string(),
                created_at: now - Duration::days(50),
                has_photo: false,
            },
            NormalizedPost {
                post_id: "post-3".to_string(),
                summary: "New arrivals on the history shelf".to_string(),
                created_at: now - Duration::days(80),
                has_photo: true,
            },
        ],
        competitors: vec![
            NormalizedCompetitor {
                name: "Paper Lantern Books".to_string(),
                review_count: 30,
                avg_rating: 4.5,
                post_count: 12,
            },
            NormalizedCompetitor {
                name: "Dockside Reads".to_string(),
                review_count: 15,
                avg_rating: 4.2,
                post_count: 9,
            },
        ],
        post_enrichment: Some(PostEnrichment {
            keyword_coverage_pct: 55.0,
        }),
        attributes: Some(BusinessAttributes {
            name_matches_storefront: true,
            categories_relevant: true,
            services_complete: true,
            has_identity_attributes: true,
            description_mentions_keywords: false,
            opening_date: chrono::NaiveDate::from_ymd_opt(2021, 3, 15),
            has_local_phone: true,
            has_chat_enabled: false,
            website_links_match: true,
            social_profiles_consistent: true,
            location_pin_accurate: true,
            hours_complete: true,
            has_special_hours: false,
            video_count: 0,
            has_virtual_tour: false,
            nap_consistent: true,
        }),
        performance: Some(NormalizedPerformance {
            total_interactions: PerformanceMetric {
                value: 520.0,
                benchmark: 600.0,
                change_pct: -8.0,
            },
            calls: PerformanceMetric {
                value: 14.0,
                benchmark: 20.0,
                change_pct: -12.5,
            },
            bookings: PerformanceMetric {
                value: 0.0,
                benchmark: 5.0,
                change_pct: 0.0,
            },
            direction_requests: PerformanceMetric {
                value: 85.0,
                benchmark: 70.0,
                change_pct: 6.0,
            },
            website_clicks: PerformanceMetric {
                value: 120.0,
                benchmark: 150.0,
                change_pct: -4.0,
            },
            messages: PerformanceMetric {
                value: 9.0,
                benchmark: 12.0,
                change_pct: -10.0,
            },
            searches: PerformanceMetric {
                value: 1450.0,
                benchmark: 1200.0,
                change_pct: 3.5,
            },
        }),
        photos: Some(NormalizedPhotoAudit {
            coverage_score: 48,
            advice: vec![
                UpstreamAdvice {
                    description: "No interior photos of the reading corner".to_string(),
                    action: "Add interior shots covering the seating area".to_string(),
                    impact: "Interior photos set expectations before a visit".to_string(),
                },
                UpstreamAdvice {
                    description: "Storefront photo is older than two years".to_string(),
                    action: "Replace the exterior photo with a current one".to_string(),
                    impact: "A current exterior helps customers recognize the entrance"
                        .to_string(),
                },
            ],
        }),
        qna: Some(NormalizedQna {
            total: 5,
            unanswered: 3,
            advice: Vec::new(),
        }),
        keywords: Some(NormalizedKeywordUsage {
            description_usage: 0,
            posts_usage: 1,
            reviews_usage: 2,
            missing_keywords: vec!["used books".to_string(), "author signings".to_string()],
        }),
        duplicates: Some(vec![NormalizedDuplicateListing {
            listing_name: "Harborline Books & Cafe".to_string(),
            address: "48 Dock Street".to_string(),
            source: "maps aggregator".to_string(),
        }]),
    }
}
