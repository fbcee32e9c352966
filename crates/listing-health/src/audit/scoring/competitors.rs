//! Competitors: the listing against the mean of its tracked rivals.
//!
//! Scoring starts from a neutral 50 and moves by fixed steps per metric.
//! Review and post volume compare as ratios against the market mean;
//! rating compares by absolute offset. An empty competitor list leaves
//! the neutral 50 untouched.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::NormalizedCompetitor;

const CATEGORY: Category = Category::Competitors;

struct MarketComparison {
    field: &'static str,
    own: f64,
    mean: f64,
    adjustment: i32,
    description: &'static str,
    action: &'static str,
    impact: &'static str,
}

pub(crate) fn score(
    own_review_count: u32,
    own_avg_rating: f64,
    own_post_count: u32,
    competitors: &[NormalizedCompetitor],
) -> CategoryScoreResult {
    if competitors.is_empty() {
        return CategoryScoreResult {
            category: CATEGORY,
            score: 50,
            checks: Vec::new(),
            recommendations: Vec::new(),
        };
    }

    let count = competitors.len() as f64;
    let mean_reviews = competitors
        .iter()
        .map(|competitor| f64::from(competitor.review_count))
        .sum::<f64>()
        / count;
    let mean_rating = competitors
        .iter()
        .map(|competitor| competitor.avg_rating)
        .sum::<f64>()
        / count;
    let mean_posts = competitors
        .iter()
        .map(|competitor| f64::from(competitor.post_count))
        .sum::<f64>()
        / count;

    let comparisons = [
        MarketComparison {
            field: "review_count_vs_market",
            own: f64::from(own_review_count),
            mean: mean_reviews,
            adjustment: ratio_adjustment(f64::from(own_review_count), mean_reviews),
            description: "Review volume trails the local market",
            action: "Close the review gap with a steady ask-for-review routine",
            impact: "Rivals with more reviews absorb the undecided searchers",
        },
        MarketComparison {
            field: "rating_vs_market",
            own: own_avg_rating,
            mean: mean_rating,
            adjustment: rating_adjustment(own_avg_rating, mean_rating),
            description: "Average rating trails the local market",
            action: "Fix the issues recurring in negative reviews before asking for new ones",
            impact: "A below-market rating is the fastest way to lose a comparison",
        },
        MarketComparison {
            field: "post_count_vs_market",
            own: f64::from(own_post_count),
            mean: mean_posts,
            adjustment: ratio_adjustment(f64::from(own_post_count), mean_posts),
            description: "Posting activity trails the local market",
            action: "Match the posting cadence of the most active competitor",
            impact: "Active rivals look better maintained on the results page",
        },
    ];

    let mut total = 50i32;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    for comparison in comparisons {
        total += comparison.adjustment;
        let observed = format!(
            "{:.1} against a market average of {:.1}",
            comparison.own, comparison.mean
        );
        if comparison.adjustment >= 15 {
            checks.push(pass(
                comparison.field,
                observed,
                "clearly ahead of the market average",
            ));
        } else {
            let priority = if comparison.adjustment < 0 {
                Priority::High
            } else {
                Priority::Medium
            };
            checks.push(fail(
                comparison.field,
                observed,
                "clearly ahead of the market average",
                comparison.action,
            ));
            recommendations.push(rec(
                CATEGORY,
                priority,
                comparison.description,
                comparison.action,
                comparison.impact,
            ));
        }
    }

    CategoryScoreResult {
        category: CATEGORY,
        score: total.clamp(0, 100) as u8,
        checks,
        recommendations,
    }
}

/// Step for volume metrics compared as own/mean ratios. A market mean of
/// zero treats any own activity as leading and none as parity.
fn ratio_adjustment(own: f64, mean: f64) -> i32 {
    if mean <= 0.0 {
        return if own > 0.0 { 15 } else { 10 };
    }
    let ratio = own / mean;
    if ratio >= 1.25 {
        15
    } else if ratio >= 1.0 {
        10
    } else if ratio >= 0.75 {
        5
    } else if ratio < 0.5 {
        -10
    } else {
        0
    }
}

/// Step for the rating metric, compared by absolute offset from the mean.
fn rating_adjustment(own: f64, mean: f64) -> i32 {
    if own >= mean + 0.5 {
        15
    } else if own >= mean {
        10
    } else if own >= mean - 0.5 {
        5
    } else if own < mean - 1.0 {
        -10
    } else {
        0
    }
}
