use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::WeightProfile;
use super::reviews::ReviewSetSummary;

/// Identifier wrapper for the account that owns a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for the audited listing itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key every audit run, lookup, and lock is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuditKey {
    pub user_id: UserId,
    pub entity_id: EntityId,
}

impl AuditKey {
    pub fn new(user_id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            entity_id: EntityId(entity_id.into()),
        }
    }
}

/// The ten audited categories, in report emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BusinessDetails,
    Reviews,
    Posts,
    Competitors,
    BusinessInfo,
    Performance,
    Photos,
    Qna,
    Keywords,
    Duplicates,
}

impl Category {
    pub const fn ordered() -> [Category; 10] {
        [
            Category::BusinessDetails,
            Category::Reviews,
            Category::Posts,
            Category::Competitors,
            Category::BusinessInfo,
            Category::Performance,
            Category::Photos,
            Category::Qna,
            Category::Keywords,
            Category::Duplicates,
        ]
    }

    /// The four categories every audit can populate from baseline signals.
    pub const fn core() -> [Category; 4] {
        [
            Category::BusinessDetails,
            Category::Reviews,
            Category::Posts,
            Category::Competitors,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::BusinessDetails => "Business Details",
            Category::Reviews => "Reviews",
            Category::Posts => "Posts",
            Category::Competitors => "Competitors",
            Category::BusinessInfo => "Business Info",
            Category::Performance => "Performance",
            Category::Photos => "Photos",
            Category::Qna => "Q&A",
            Category::Keywords => "Keywords",
            Category::Duplicates => "Duplicates",
        }
    }

    pub const fn is_core(self) -> bool {
        matches!(
            self,
            Category::BusinessDetails
                | Category::Reviews
                | Category::Posts
                | Category::Competitors
        )
    }
}

/// Remediation urgency attached to every recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort key: lower ranks sort first, so high-priority items lead.
    pub const fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "fail",
        }
    }
}

/// One audited facet with what was observed against what the rubric expects.
/// Failing checks carry the short remediation hint inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCheck {
    pub field: String,
    pub status: CheckStatus,
    pub observed: String,
    pub expected: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Actionable remediation emitted by a scorer for a failing facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub priority: Priority,
    pub description: String,
    pub action: String,
    pub impact: String,
}

/// Scorer output for a single category: the 0-100 score, check trail, and
/// the recommendations its failing facets produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScoreResult {
    pub category: Category,
    pub score: u8,
    pub checks: Vec<CategoryCheck>,
    pub recommendations: Vec<Recommendation>,
}

/// Complete output of one audit run, persisted verbatim by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub audit_id: String,
    pub user_id: UserId,
    pub entity_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub weight_profile: WeightProfile,
    pub category_scores: BTreeMap<Category, u8>,
    pub categories: Vec<CategoryScoreResult>,
    pub recommendations: Vec<Recommendation>,
    pub business_info_checks: Vec<CategoryCheck>,
    pub review_summary: ReviewSetSummary,
}

impl AuditResult {
    pub fn key(&self) -> AuditKey {
        AuditKey {
            user_id: self.user_id.clone(),
            entity_id: self.entity_id.clone(),
        }
    }

    pub fn score_for(&self, category: Category) -> Option<u8> {
        self.category_scores.get(&category).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_matches_report_layout() {
        let ordered = Category::ordered();
        assert_eq!(ordered[0], Category::BusinessDetails);
        assert_eq!(ordered[3], Category::Competitors);
        assert_eq!(ordered[9], Category::Duplicates);
        assert_eq!(ordered.len(), 10);
    }

    #[test]
    fn core_categories_are_flagged() {
        for category in Category::core() {
            assert!(category.is_core(), "{} should be core", category.label());
        }
        assert!(!Category::Performance.is_core());
        assert!(!Category::Duplicates.is_core());
    }

    #[test]
    fn priority_rank_orders_high_first() {
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort_by_key(|priority| priority.rank());
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::Qna).expect("serialize");
        assert_eq!(json, "\"qna\"");
        let json = serde_json::to_string(&Category::BusinessDetails).expect("serialize");
        assert_eq!(json, "\"business_details\"");
    }
}
