//! Historical insight points and the trend between the two newest runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AuditResult, Category};

/// One audit run reduced to the numbers worth charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightPoint {
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub category_scores: BTreeMap<Category, u8>,
}

impl From<&AuditResult> for InsightPoint {
    fn from(result: &AuditResult) -> Self {
        InsightPoint {
            timestamp: result.timestamp,
            overall_score: result.overall_score,
            category_scores: result.category_scores.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Steady,
    Declining,
}

impl TrendDirection {
    pub const fn label(self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Steady => "steady",
            TrendDirection::Declining => "declining",
        }
    }
}

/// How one category moved between the two newest runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMovement {
    pub category: Category,
    pub previous: u8,
    pub current: u8,
    pub delta: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditTrend {
    pub direction: TrendDirection,
    pub score_delta: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_improvement: Option<CategoryMovement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_regression: Option<CategoryMovement>,
}

/// Compares the two newest points (the slice is newest first) and reports
/// the overall movement plus the categories that moved the most either
/// way. Categories scored in only one of the two runs are skipped rather
/// than treated as a swing from zero.
pub fn trend(points: &[InsightPoint]) -> Option<AuditTrend> {
    let current = points.first()?;
    let previous = points.get(1)?;

    let score_delta = i16::from(current.overall_score) - i16::from(previous.overall_score);
    let direction = match score_delta {
        delta if delta > 0 => TrendDirection::Improving,
        delta if delta < 0 => TrendDirection::Declining,
        _ => TrendDirection::Steady,
    };

    let mut movements: Vec<CategoryMovement> = Vec::new();
    for (category, current_score) in &current.category_scores {
        let Some(previous_score) = previous.category_scores.get(category) else {
            continue;
        };
        movements.push(CategoryMovement {
            category: *category,
            previous: *previous_score,
            current: *current_score,
            delta: i16::from(*current_score) - i16::from(*previous_score),
        });
    }

    let top_improvement = movements
        .iter()
        .filter(|movement| movement.delta > 0)
        .max_by_key(|movement| movement.delta)
        .cloned();
    let top_regression = movements
        .iter()
        .filter(|movement| movement.delta < 0)
        .min_by_key(|movement| movement.delta)
        .cloned();

    Some(AuditTrend {
        direction,
        score_delta,
        top_improvement,
        top_regression,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn point(day: u32, overall: u8, categories: &[(Category, u8)]) -> InsightPoint {
        InsightPoint {
            timestamp: Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap(),
            overall_score: overall,
            category_scores: categories.iter().copied().collect(),
        }
    }

    #[test]
    fn fewer_than_two_points_has_no_trend() {
        assert!(trend(&[]).is_none());
        assert!(trend(&[point(1, 70, &[(Category::Reviews, 70)])]).is_none());
    }

    #[test]
    fn improving_run_reports_largest_swings() {
        let points = vec![
            point(
                15,
                82,
                &[
                    (Category::BusinessDetails, 90),
                    (Category::Reviews, 85),
                    (Category::Posts, 40),
                ],
            ),
            point(
                8,
                70,
                &[
                    (Category::BusinessDetails, 75),
                    (Category::Reviews, 80),
                    (Category::Posts, 65),
                ],
            ),
        ];

        let trend = trend(&points).expect("two points present");
        assert_eq!(trend.direction, TrendDirection::Improving);
        assert_eq!(trend.score_delta, 12);

        let improvement = trend.top_improvement.expect("a category improved");
        assert_eq!(improvement.category, Category::BusinessDetails);
        assert_eq!(improvement.delta, 15);

        let regression = trend.top_regression.expect("a category regressed");
        assert_eq!(regression.category, Category::Posts);
        assert_eq!(regression.delta, -25);
    }

    #[test]
    fn equal_scores_are_steady() {
        let points = vec![
            point(15, 70, &[(Category::Reviews, 70)]),
            point(8, 70, &[(Category::Reviews, 70)]),
        ];

        let trend = trend(&points).expect("two points present");
        assert_eq!(trend.direction, TrendDirection::Steady);
        assert_eq!(trend.score_delta, 0);
        assert!(trend.top_improvement.is_none());
        assert!(trend.top_regression.is_none());
    }

    #[test]
    fn categories_missing_from_either_run_are_skipped() {
        let points = vec![
            point(
                15,
                60,
                &[(Category::Reviews, 55), (Category::Keywords, 100)],
            ),
            point(8, 65, &[(Category::Reviews, 80), (Category::Photos, 90)]),
        ];

        let trend = trend(&points).expect("two points present");
        assert_eq!(trend.direction, TrendDirection::Declining);
        assert_eq!(trend.score_delta, -5);
        assert!(trend.top_improvement.is_none());
        let regression = trend.top_regression.expect("reviews regressed");
        assert_eq!(regression.category, Category::Reviews);
        assert_eq!(regression.delta, -25);
    }
}
