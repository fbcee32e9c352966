//! Reviews: volume, average rating, and owner response rate.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::reviews::ReviewSetSummary;

const CATEGORY: Category = Category::Reviews;

pub(crate) fn score(summary: &ReviewSetSummary) -> CategoryScoreResult {
    let mut score = 0u32;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    // Volume.
    let count = summary.total_reviews;
    if count >= 100 {
        score += 35;
        checks.push(pass(
            "review_volume",
            format!("{count} reviews"),
            "100 reviews or more",
        ));
    } else {
        if count >= 25 {
            score += 25;
        } else if count >= 10 {
            score += 5;
        }
        checks.push(fail(
            "review_volume",
            format!("{count} reviews"),
            "100 reviews or more",
            "Ask regulars for reviews",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "Review volume is below the strongest tier",
            "Ask satisfied customers for a review after each visit",
            "Review count is one of the heaviest local ranking inputs",
        ));
    }

    // Average rating.
    let rating = summary.average_rating;
    if rating >= 4.5 {
        score += 35;
        checks.push(pass(
            "average_rating",
            format!("{rating:.1} average"),
            "4.5 or higher",
        ));
    } else {
        if rating >= 4.0 {
            score += 25;
        } else if rating >= 3.5 {
            score += 15;
        } else if rating >= 3.0 {
            score += 5;
        }
        checks.push(fail(
            "average_rating",
            format!("{rating:.1} average"),
            "4.5 or higher",
            "Address recurring complaints",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Average rating trails the strongest tier",
            "Work through the negative themes and fix the underlying issues",
            "Rating is the first thing searchers compare across nearby listings",
        ));
    }

    // Owner response rate.
    let response_rate = summary.response_rate_pct;
    if response_rate >= 90.0 {
        score += 30;
        checks.push(pass(
            "response_rate",
            format!("{response_rate:.0}% replied"),
            "90% of reviews answered",
        ));
    } else {
        if response_rate >= 80.0 {
            score += 25;
        } else if response_rate >= 60.0 {
            score += 15;
        } else if response_rate >= 40.0 {
            score += 5;
        }
        checks.push(fail(
            "response_rate",
            format!("{response_rate:.0}% replied"),
            "90% of reviews answered",
            "Reply to unanswered reviews",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "Too many reviews sit without an owner reply",
            "Reply to every review, starting with the unanswered negative ones",
            "Visible owner replies lift both conversion and reviewer goodwill",
        ));
    }

    CategoryScoreResult {
        category: CATEGORY,
        score: score.min(100) as u8,
        checks,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::reviews::analyze;
    use crate::audit::signals::NormalizedReview;
    use chrono::{Duration, TimeZone, Utc};

    fn summary(total: u32, average: f64, response_rate: f64) -> ReviewSetSummary {
        let mut base = analyze(&[], Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()).summary;
        base.total_reviews = total;
        base.average_rating = average;
        base.response_rate_pct = response_rate;
        base
    }

    #[test]
    fn middling_listing_lands_on_sixty_five() {
        // 25 for volume, 25 for rating, 15 for responses.
        let result = score(&summary(48, 4.2, 75.0));
        assert_eq!(result.score, 65);
    }

    #[test]
    fn strong_listing_scores_full_marks() {
        let result = score(&summary(150, 4.7, 95.0));
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn rating_recommendation_outranks_the_others() {
        let result = score(&summary(5, 2.5, 10.0));
        assert_eq!(result.score, 0);
        let rating_rec = result
            .recommendations
            .iter()
            .find(|r| r.description.contains("rating"))
            .expect("rating recommendation present");
        assert_eq!(rating_rec.priority, Priority::High);
    }

    #[test]
    fn empty_set_scores_zero_without_panicking() {
        let reviews: Vec<NormalizedReview> = Vec::new();
        let analyzed = analyze(&reviews, Utc::now() - Duration::days(1));
        let result = score(&analyzed.summary);
        assert_eq!(result.score, 0);
    }
}
