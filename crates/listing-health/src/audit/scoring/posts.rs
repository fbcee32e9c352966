//! Posts: publishing cadence, recency, photo usage, and keyword coverage.
//!
//! Two scales exist. When enrichment data is present the enriched 0-20
//! sub-score applies (scaled by five); otherwise the legacy additive scale
//! runs on the raw post list alone. Enrichment always wins when supplied,
//! even where the two scales would disagree.

use chrono::{DateTime, Utc};

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::{NormalizedPost, PostEnrichment};

const CATEGORY: Category = Category::Posts;

/// Cadence is measured over the trailing eight weeks.
const CADENCE_WINDOW_DAYS: i64 = 56;

pub(crate) fn score(
    posts: &[NormalizedPost],
    enrichment: Option<&PostEnrichment>,
    now: DateTime<Utc>,
) -> CategoryScoreResult {
    let recent = posts
        .iter()
        .filter(|post| (now - post.created_at).num_days() < CADENCE_WINDOW_DAYS)
        .count();
    let cadence_per_week = recent as f64 / (CADENCE_WINDOW_DAYS as f64 / 7.0);
    let recency_days = posts
        .iter()
        .map(|post| (now - post.created_at).num_days())
        .min();
    let photo_ratio_pct = if posts.is_empty() {
        0.0
    } else {
        posts.iter().filter(|post| post.has_photo).count() as f64 / posts.len() as f64 * 100.0
    };

    match enrichment {
        Some(enrichment) => enriched(
            cadence_per_week,
            recency_days,
            photo_ratio_pct,
            enrichment.keyword_coverage_pct,
        ),
        None => legacy(cadence_per_week, recency_days, photo_ratio_pct),
    }
}

fn enriched(
    cadence_per_week: f64,
    recency_days: Option<i64>,
    photo_ratio_pct: f64,
    coverage_pct: f64,
) -> CategoryScoreResult {
    let mut sub_score = 0u32;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    if cadence_per_week >= 1.0 {
        sub_score += 5;
        checks.push(pass(
            "posting_cadence",
            format!("{cadence_per_week:.2} posts per week"),
            "at least one post per week",
        ));
    } else {
        if cadence_per_week >= 0.5 {
            sub_score += 3;
        } else if cadence_per_week > 0.0 {
            sub_score += 1;
        }
        checks.push(fail(
            "posting_cadence",
            format!("{cadence_per_week:.2} posts per week"),
            "at least one post per week",
            "Post weekly",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "Posting cadence has fallen below weekly",
            "Schedule at least one post per week",
            "Regular posts keep the listing surfacing in update feeds",
        ));
    }

    match recency_days {
        Some(age) if age <= 7 => {
            sub_score += 5;
            checks.push(pass(
                "post_recency",
                format!("newest post {age} days old"),
                "a post within the last week",
            ));
        }
        Some(age) => {
            if age <= 14 {
                sub_score += 4;
            } else if age <= 30 {
                sub_score += 2;
            } else if age <= 60 {
                sub_score += 1;
            }
            checks.push(fail(
                "post_recency",
                format!("newest post {age} days old"),
                "a post within the last week",
                "Publish a new post",
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "The newest post is getting stale",
                "Publish a fresh post this week",
                "Recent posts signal an active business to searchers",
            ));
        }
        None => {
            checks.push(fail(
                "post_recency",
                "no posts published",
                "a post within the last week",
                "Publish a first post",
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "The listing has never published a post",
                "Publish a first post introducing the business",
                "Recent posts signal an active business to searchers",
            ));
        }
    }

    if photo_ratio_pct >= 80.0 {
        sub_score += 5;
        checks.push(pass(
            "post_photo_ratio",
            format!("{photo_ratio_pct:.0}% of posts carry a photo"),
            "80% of posts with a photo",
        ));
    } else {
        if photo_ratio_pct >= 50.0 {
            sub_score += 3;
        } else if photo_ratio_pct >= 30.0 {
            sub_score += 1;
        }
        checks.push(fail(
            "post_photo_ratio",
            format!("{photo_ratio_pct:.0}% of posts carry a photo"),
            "80% of posts with a photo",
            "Attach photos to posts",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Low,
            "Most posts go out without a photo",
            "Attach a photo to every post",
            "Posts with images earn more taps than text-only updates",
        ));
    }

    if coverage_pct >= 80.0 {
        sub_score += 5;
        checks.push(pass(
            "service_keyword_coverage",
            format!("{coverage_pct:.0}% of posts mention a tracked service"),
            "80% keyword coverage",
        ));
    } else {
        if coverage_pct >= 60.0 {
            sub_score += 4;
        } else if coverage_pct >= 40.0 {
            sub_score += 2;
        } else if coverage_pct > 0.0 {
            sub_score += 1;
        }
        checks.push(fail(
            "service_keyword_coverage",
            format!("{coverage_pct:.0}% of posts mention a tracked service"),
            "80% keyword coverage",
            "Mention tracked services in posts",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "Posts rarely mention the services being tracked",
            "Work one tracked service into each upcoming post",
            "Keyword-bearing posts reinforce what the listing should rank for",
        ));
    }

    CategoryScoreResult {
        category: CATEGORY,
        score: (sub_score * 5).min(100) as u8,
        checks,
        recommendations,
    }
}

fn legacy(
    cadence_per_week: f64,
    recency_days: Option<i64>,
    photo_ratio_pct: f64,
) -> CategoryScoreResult {
    let mut score = 0u32;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    if cadence_per_week >= 2.0 {
        score += 40;
        checks.push(pass(
            "posting_cadence",
            format!("{cadence_per_week:.2} posts per week"),
            "two posts per week",
        ));
    } else {
        if cadence_per_week >= 1.0 {
            score += 30;
        } else if cadence_per_week >= 0.5 {
            score += 20;
        } else if cadence_per_week >= 0.25 {
            score += 10;
        }
        checks.push(fail(
            "posting_cadence",
            format!("{cadence_per_week:.2} posts per week"),
            "two posts per week",
            "Post more often",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "Posting cadence trails the strongest tier",
            "Build up to two posts per week",
            "Regular posts keep the listing surfacing in update feeds",
        ));
    }

    match recency_days {
        Some(age) if age <= 7 => {
            score += 30;
            checks.push(pass(
                "post_recency",
                format!("newest post {age} days old"),
                "a post within the last week",
            ));
        }
        Some(age) => {
            if age <= 14 {
                score += 20;
            } else if age <= 30 {
                score += 10;
            }
            checks.push(fail(
                "post_recency",
                format!("newest post {age} days old"),
                "a post within the last week",
                "Publish a new post",
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "The newest post is getting stale",
                "Publish a fresh post this week",
                "Recent posts signal an active business to searchers",
            ));
        }
        None => {
            checks.push(fail(
                "post_recency",
                "no posts published",
                "a post within the last week",
                "Publish a first post",
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "The listing has never published a post",
                "Publish a first post introducing the business",
                "Recent posts signal an active business to searchers",
            ));
        }
    }

    if photo_ratio_pct >= 80.0 {
        score += 30;
        checks.push(pass(
            "post_photo_ratio",
            format!("{photo_ratio_pct:.0}% of posts carry a photo"),
            "80% of posts with a photo",
        ));
    } else {
        if photo_ratio_pct >= 60.0 {
            score += 20;
        } else if photo_ratio_pct >= 40.0 {
            score += 10;
        }
        checks.push(fail(
            "post_photo_ratio",
            format!("{photo_ratio_pct:.0}% of posts carry a photo"),
            "80% of posts with a photo",
            "Attach photos to posts",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Low,
            "Most posts go out without a photo",
            "Attach a photo to every post",
            "Posts with images earn more taps than text-only updates",
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
    use chrono::{Duration, TimeZone};

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()
    }

    fn post(id: &str, days_ago: i64, has_photo: bool) -> NormalizedPost {
        NormalizedPost {
            post_id: id.to_string(),
            summary: format!("Update {id}"),
            created_at: clock() - Duration::days(days_ago),
            has_photo,
        }
    }

    fn six_recent_posts() -> Vec<NormalizedPost> {
        vec![
            post("p1", 10, true),
            post("p2", 17, true),
            post("p3", 24, true),
            post("p4", 31, true),
            post("p5", 38, false),
            post("p6", 45, false),
        ]
    }

    #[test]
    fn enrichment_takes_precedence_over_legacy_scale() {
        let posts = six_recent_posts();
        let enrichment = PostEnrichment {
            keyword_coverage_pct: 85.0,
        };

        // Sub-scores: cadence 0.75/wk -> 3, recency 10d -> 4,
        // photo ratio 66.7% -> 3, coverage 85% -> 5; (3+4+3+5)*5 = 75.
        let enriched = score(&posts, Some(&enrichment), clock());
        assert_eq!(enriched.score, 75);

        // Legacy on the same posts: 20 + 20 + 20 = 60.
        let legacy = score(&posts, None, clock());
        assert_eq!(legacy.score, 60);
    }

    #[test]
    fn weekly_cadence_with_fresh_photo_posts_maxes_out() {
        let posts: Vec<NormalizedPost> = (0..9)
            .map(|i| post(&format!("p{i}"), i64::from(i) * 6 + 1, true))
            .collect();
        let enrichment = PostEnrichment {
            keyword_coverage_pct: 92.0,
        };

        let result = score(&posts, Some(&enrichment), clock());
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn no_posts_scores_zero_on_legacy_scale() {
        let result = score(&[], None, clock());
        assert_eq!(result.score, 0);
        assert!(result
            .checks
            .iter()
            .any(|check| check.field == "post_recency" && check.observed.contains("no posts")));
    }

    #[test]
    fn enrichment_alone_still_scores_coverage() {
        let enrichment = PostEnrichment {
            keyword_coverage_pct: 85.0,
        };
        let result = score(&[], Some(&enrichment), clock());
        assert_eq!(result.score, 25);
    }

    #[test]
    fn recency_boundary_sits_at_seven_days() {
        let posts = vec![post("p1", 7, true)];
        let result = score(&posts, None, clock());
        let recency = result
            .checks
            .iter()
            .find(|check| check.field == "post_recency")
            .expect("recency check present");
        assert_eq!(recency.observed, "newest post 7 days old");
        assert_eq!(recency.recommendation, None);
    }
}
