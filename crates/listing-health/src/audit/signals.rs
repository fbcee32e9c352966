use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Everything a signal provider hands the auditor for one listing.
///
/// The four core inputs (`business`, `reviews`, `posts`, `competitors`) are
/// always present, possibly empty. The optional blocks switch their
/// categories on: a missing block means the category was not audited, which
/// is different from a present-but-empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSignals {
    pub business: NormalizedBusinessInfo,
    pub reviews: Vec<NormalizedReview>,
    pub posts: Vec<NormalizedPost>,
    pub competitors: Vec<NormalizedCompetitor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_enrichment: Option<PostEnrichment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BusinessAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<NormalizedPerformance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<NormalizedPhotoAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qna: Option<NormalizedQna>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<NormalizedKeywordUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Vec<NormalizedDuplicateListing>>,
}

impl AuditSignals {
    /// Reject malformed signals before any scorer sees them.
    pub fn validate(&self) -> Result<(), SignalError> {
        for (index, review) in self.reviews.iter().enumerate() {
            if review.review_id.trim().is_empty() {
                return Err(SignalError::Invalid {
                    field: "reviews.review_id",
                    detail: format!("review at index {index} has an empty id"),
                });
            }
            if !(1..=5).contains(&review.rating) {
                return Err(SignalError::Invalid {
                    field: "reviews.rating",
                    detail: format!(
                        "review {} has rating {} outside 1..=5",
                        review.review_id, review.rating
                    ),
                });
            }
        }

        for competitor in &self.competitors {
            if !competitor.avg_rating.is_finite()
                || !(0.0..=5.0).contains(&competitor.avg_rating)
            {
                return Err(SignalError::Invalid {
                    field: "competitors.avg_rating",
                    detail: format!(
                        "competitor {} has rating {} outside 0..=5",
                        competitor.name, competitor.avg_rating
                    ),
                });
            }
        }

        if let Some(enrichment) = &self.post_enrichment {
            if !enrichment.keyword_coverage_pct.is_finite()
                || !(0.0..=100.0).contains(&enrichment.keyword_coverage_pct)
            {
                return Err(SignalError::Invalid {
                    field: "post_enrichment.keyword_coverage_pct",
                    detail: format!(
                        "coverage {} outside 0..=100",
                        enrichment.keyword_coverage_pct
                    ),
                });
            }
        }

        if let Some(performance) = &self.performance {
            for (name, metric) in performance.metrics() {
                if !metric.value.is_finite()
                    || !metric.benchmark.is_finite()
                    || !metric.change_pct.is_finite()
                {
                    return Err(SignalError::Invalid {
                        field: "performance",
                        detail: format!("metric {name} contains a non-finite value"),
                    });
                }
            }
        }

        if let Some(photos) = &self.photos {
            if photos.coverage_score > 100 {
                return Err(SignalError::Invalid {
                    field: "photos.coverage_score",
                    detail: format!("coverage score {} exceeds 100", photos.coverage_score),
                });
            }
        }

        if let Some(qna) = &self.qna {
            if qna.unanswered > qna.total {
                return Err(SignalError::Invalid {
                    field: "qna.unanswered",
                    detail: format!(
                        "unanswered {} exceeds total {}",
                        qna.unanswered, qna.total
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Core listing facts behind the Business Details score and the
/// completeness checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBusinessInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub photo_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_updated_at: Option<DateTime<Utc>>,
}

/// Extended attribute judgments feeding the twelve completeness checks.
/// Presence of this block switches the Business Info category on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessAttributes {
    pub name_matches_storefront: bool,
    pub categories_relevant: bool,
    pub services_complete: bool,
    pub has_identity_attributes: bool,
    pub description_mentions_keywords: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_date: Option<NaiveDate>,
    pub has_local_phone: bool,
    pub has_chat_enabled: bool,
    pub website_links_match: bool,
    pub social_profiles_consistent: bool,
    pub location_pin_accurate: bool,
    pub hours_complete: bool,
    pub has_special_hours: bool,
    pub video_count: u32,
    pub has_virtual_tour: bool,
    pub nap_consistent: bool,
}

/// One published review, normalized from whatever source fetched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReview {
    pub review_id: String,
    pub reviewer: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<DateTime<Utc>>,
}

impl NormalizedReview {
    pub fn has_reply(&self) -> bool {
        self.replied_at.is_some()
    }
}

/// One published post on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub post_id: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub has_photo: bool,
}

/// Upstream enrichment for post scoring. When present, the enriched
/// sub-score scale applies instead of the legacy one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostEnrichment {
    /// Share of posts mentioning a tracked service keyword, 0-100.
    pub keyword_coverage_pct: f64,
}

/// Interaction metrics with platform benchmarks for the same vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub value: f64,
    pub benchmark: f64,
    pub change_pct: f64,
}

/// The seven interaction metrics the Performance scorer weighs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPerformance {
    pub total_interactions: PerformanceMetric,
    pub calls: PerformanceMetric,
    pub bookings: PerformanceMetric,
    pub direction_requests: PerformanceMetric,
    pub website_clicks: PerformanceMetric,
    pub messages: PerformanceMetric,
    pub searches: PerformanceMetric,
}

impl NormalizedPerformance {
    pub(crate) fn metrics(&self) -> [(&'static str, PerformanceMetric); 7] {
        [
            ("total_interactions", self.total_interactions),
            ("calls", self.calls),
            ("bookings", self.bookings),
            ("direction_requests", self.direction_requests),
            ("website_clicks", self.website_clicks),
            ("messages", self.messages),
            ("searches", self.searches),
        ]
    }
}

/// Advice computed by an upstream media or Q&A auditor, passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamAdvice {
    pub description: String,
    pub action: String,
    pub impact: String,
}

/// Photo audit results computed upstream; the score passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPhotoAudit {
    pub coverage_score: u8,
    #[serde(default)]
    pub advice: Vec<UpstreamAdvice>,
}

/// Question and answer counts on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQna {
    pub total: u32,
    pub unanswered: u32,
    #[serde(default)]
    pub advice: Vec<UpstreamAdvice>,
}

/// A competing listing in the same market, already resolved upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCompetitor {
    pub name: String,
    pub review_count: u32,
    pub avg_rating: f64,
    pub post_count: u32,
}

/// A suspected duplicate of the audited listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDuplicateListing {
    pub listing_name: String,
    pub address: String,
    pub source: String,
}

/// How often tracked keywords appear across listing surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedKeywordUsage {
    pub description_usage: u32,
    pub posts_usage: u32,
    pub reviews_usage: u32,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

/// Raised when provider signals are malformed or cannot be fetched.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("invalid signal field {field}: {detail}")]
    Invalid {
        field: &'static str,
        detail: String,
    },
    #[error("signal source unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn business() -> NormalizedBusinessInfo {
        NormalizedBusinessInfo {
            name: "Juniper Cafe".to_string(),
            address: "12 Elm St".to_string(),
            phone: "515-555-0101".to_string(),
            description: "Neighborhood cafe".to_string(),
            website: None,
            photo_count: 3,
            hours_updated_at: None,
        }
    }

    fn baseline() -> AuditSignals {
        AuditSignals {
            business: business(),
            reviews: Vec::new(),
            posts: Vec::new(),
            competitors: Vec::new(),
            post_enrichment: None,
            attributes: None,
            performance: None,
            photos: None,
            qna: None,
            keywords: None,
            duplicates: None,
        }
    }

    #[test]
    fn validate_accepts_empty_core_collections() {
        baseline().validate().expect("empty signals are valid");
    }

    #[test]
    fn validate_rejects_out_of_range_rating() {
        let mut signals = baseline();
        signals.reviews.push(NormalizedReview {
            review_id: "r-1".to_string(),
            reviewer: "Dana".to_string(),
            rating: 6,
            comment: "great".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            replied_at: None,
        });

        let error = signals.validate().expect_err("rating 6 must fail");
        match error {
            SignalError::Invalid { field, .. } => assert_eq!(field, "reviews.rating"),
            other => panic!("expected invalid field error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unanswered_above_total() {
        let mut signals = baseline();
        signals.qna = Some(NormalizedQna {
            total: 2,
            unanswered: 3,
            advice: Vec::new(),
        });

        let error = signals.validate().expect_err("inconsistent counts fail");
        assert!(matches!(error, SignalError::Invalid { field, .. } if field == "qna.unanswered"));
    }

    #[test]
    fn validate_rejects_non_finite_performance() {
        let metric = PerformanceMetric {
            value: f64::NAN,
            benchmark: 10.0,
            change_pct: 0.0,
        };
        let flat = PerformanceMetric {
            value: 1.0,
            benchmark: 1.0,
            change_pct: 0.0,
        };
        let mut signals = baseline();
        signals.performance = Some(NormalizedPerformance {
            total_interactions: metric,
            calls: flat,
            bookings: flat,
            direction_requests: flat,
            website_clicks: flat,
            messages: flat,
            searches: flat,
        });

        assert!(signals.validate().is_err());
    }
}
