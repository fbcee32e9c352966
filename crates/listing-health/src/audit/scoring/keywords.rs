//! Keywords: how hard the tracked terms work across listing surfaces.
//!
//! Description mentions weigh heaviest, then posts, then reviews. Every
//! tracked keyword with no usage anywhere gets its own high-priority
//! recommendation.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::NormalizedKeywordUsage;

const CATEGORY: Category = Category::Keywords;

pub(crate) fn score(usage: &NormalizedKeywordUsage) -> CategoryScoreResult {
    let raw =
        usage.description_usage * 20 + usage.posts_usage * 10 + usage.reviews_usage * 5;
    let score = raw.min(100) as u8;

    let mut checks = Vec::new();
    for (field, count, surface) in [
        ("description_usage", usage.description_usage, "description"),
        ("posts_usage", usage.posts_usage, "posts"),
        ("reviews_usage", usage.reviews_usage, "reviews"),
    ] {
        if count > 0 {
            checks.push(pass(
                field,
                format!("{count} keyword mentions in {surface}"),
                format!("tracked keywords used in {surface}"),
            ));
        } else {
            checks.push(fail(
                field,
                format!("no keyword mentions in {surface}"),
                format!("tracked keywords used in {surface}"),
                format!("Work tracked keywords into {surface}"),
            ));
        }
    }

    let recommendations = usage
        .missing_keywords
        .iter()
        .map(|keyword| {
            rec(
                CATEGORY,
                Priority::High,
                format!("Tracked keyword \"{keyword}\" is unused"),
                format!("Work \"{keyword}\" into the description and upcoming posts"),
                "Unused keywords leave the searches they represent to competitors",
            )
        })
        .collect();

    CategoryScoreResult {
        category: CATEGORY,
        score,
        checks,
        recommendations,
    }
}
