//! Photos: the upstream media auditor already did the work.
//!
//! Its coverage score passes through unchanged and its advice becomes
//! medium-priority recommendations one for one.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::NormalizedPhotoAudit;

const CATEGORY: Category = Category::Photos;

pub(crate) fn score(audit: &NormalizedPhotoAudit) -> CategoryScoreResult {
    let mut checks = Vec::new();
    if audit.advice.is_empty() {
        checks.push(pass(
            "photo_coverage",
            format!("coverage score {}", audit.coverage_score),
            "no outstanding photo gaps",
        ));
    } else {
        checks.push(fail(
            "photo_coverage",
            format!(
                "coverage score {} with {} outstanding gaps",
                audit.coverage_score,
                audit.advice.len()
            ),
            "no outstanding photo gaps",
            "Work through the flagged photo gaps",
        ));
    }

    let recommendations = audit
        .advice
        .iter()
        .map(|advice| {
            rec(
                CATEGORY,
                Priority::Medium,
                advice.description.clone(),
                advice.action.clone(),
                advice.impact.clone(),
            )
        })
        .collect();

    CategoryScoreResult {
        category: CATEGORY,
        score: audit.coverage_score.min(100),
        checks,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::signals::UpstreamAdvice;

    #[test]
    fn coverage_score_passes_through_unchanged() {
        let audit = NormalizedPhotoAudit {
            coverage_score: 73,
            advice: Vec::new(),
        };
        let result = score(&audit);
        assert_eq!(result.score, 73);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn upstream_advice_maps_one_to_one_at_medium_priority() {
        let audit = NormalizedPhotoAudit {
            coverage_score: 55,
            advice: vec![
                UpstreamAdvice {
                    description: "No exterior photos".to_string(),
                    action: "Add a storefront photo".to_string(),
                    impact: "Exterior shots help customers find the door".to_string(),
                },
                UpstreamAdvice {
                    description: "Menu photos are outdated".to_string(),
                    action: "Reshoot the current menu".to_string(),
                    impact: "Outdated menus trigger complaints".to_string(),
                },
            ],
        };

        let result = score(&audit);
        assert_eq!(result.score, 55);
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0].description, "No exterior photos");
        assert!(result
            .recommendations
            .iter()
            .all(|r| r.priority == Priority::Medium));
    }
}
