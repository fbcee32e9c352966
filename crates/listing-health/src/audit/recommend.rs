//! Cross-category recommendation roll-up.

use super::domain::{CategoryScoreResult, Recommendation};

/// Flattens every category's recommendations into one list ordered
/// high-to-low by priority. The sort is stable, so within a priority
/// band items keep the category evaluation order they were produced in.
pub(crate) fn synthesize(categories: &[CategoryScoreResult]) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = categories
        .iter()
        .flat_map(|category| category.recommendations.iter().cloned())
        .collect();
    recommendations.sort_by_key(|recommendation| recommendation.priority.rank());
    recommendations
}
