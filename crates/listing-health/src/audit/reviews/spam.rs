//! Heuristic spam screening for imported reviews.
//!
//! Rules run in a fixed order and the first match wins, so a promotional
//! link is always reported as promotional even when the comment is also
//! short or generic.

use serde::{Deserialize, Serialize};

use super::lexicon;
use crate::audit::signals::NormalizedReview;

/// A review singled out by one of the screening rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamFlag {
    pub review_id: String,
    pub reason: String,
    pub confidence: f64,
}

pub(crate) const PROMOTIONAL_REASON: &str = "Contains promotional URL or unrelated keywords";
const SHORT_EXTREME_REASON: &str = "Very short comment paired with an extreme rating";
const GENERIC_EXTREME_REASON: &str = "Generic phrasing paired with an extreme rating";

const URL_FRAGMENTS: &[&str] = &["http://", "https://", "www."];

/// True when the text carries a link or drifts into off-topic promotion.
pub(crate) fn looks_promotional(text: &str) -> bool {
    let lowered = text.to_lowercase();
    if URL_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
    {
        return true;
    }
    lexicon::tokenize(text)
        .iter()
        .any(|token| lexicon::OFFTOPIC_KEYWORDS.contains(&token.as_str()))
}

/// Screen one review. Comment length is measured in characters, and an
/// extreme rating means the lowest or highest star.
pub(crate) fn flag_for(review: &NormalizedReview) -> Option<SpamFlag> {
    let length = review.comment.chars().count();
    let extreme_rating = review.rating == 1 || review.rating == 5;

    if looks_promotional(&review.comment) {
        return Some(flag(review, PROMOTIONAL_REASON, 0.9));
    }

    if extreme_rating && length < 10 {
        return Some(flag(review, SHORT_EXTREME_REASON, 0.6));
    }

    if extreme_rating && length < 20 {
        let generic = lexicon::tokenize(&review.comment)
            .iter()
            .any(|token| lexicon::GENERIC_TERMS.contains(&token.as_str()));
        if generic {
            return Some(flag(review, GENERIC_EXTREME_REASON, 0.5));
        }
    }

    None
}

fn flag(review: &NormalizedReview, reason: &str, confidence: f64) -> SpamFlag {
    SpamFlag {
        review_id: review.review_id.clone(),
        reason: reason.to_string(),
        confidence,
    }
}
