//! Review analysis pipeline.
//!
//! [`analyze`] walks a normalized review set once and produces per-review
//! sentiment, themes, and spam flags plus the set-level summary the
//! Reviews scorer and the report surface consume. Reply-freshness facts
//! are computed against the run timestamp handed in by the caller so a
//! stored audit never drifts when it is re-read later.

mod lexicon;
mod sentiment;
mod spam;
mod themes;

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::signals::NormalizedReview;

pub use sentiment::{SentimentLabel, SentimentResult};
pub use spam::SpamFlag;
pub use themes::ThemeBuckets;

pub(crate) use spam::looks_promotional;

/// Analysis of a single review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedReview {
    pub review_id: String,
    pub rating: u8,
    pub sentiment: SentimentResult,
    pub themes: Vec<String>,
}

/// A theme mentioned by more than one review, with how the reviews that
/// mention it lean on average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTheme {
    pub theme: String,
    pub count: u32,
    pub avg_sentiment: f64,
}

/// Set-level facts derived from one pass over the review list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSetSummary {
    pub total_reviews: u32,
    pub average_rating: f64,
    pub response_rate_pct: f64,
    pub replies_within_48h: u32,
    pub unreplied_older_than_7d: u32,
    pub sentiment_distribution: BTreeMap<SentimentLabel, u8>,
    pub common_themes: Vec<CommonTheme>,
    pub theme_buckets: ThemeBuckets,
    pub spam_flags: Vec<SpamFlag>,
}

/// Full analyzer output: one entry per review plus the set summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub reviews: Vec<AnalyzedReview>,
    pub summary: ReviewSetSummary,
}

/// Analyze a review set against the given run timestamp.
pub fn analyze(reviews: &[NormalizedReview], now: DateTime<Utc>) -> ReviewAnalysis {
    let corpus = themes::corpus_frequencies(reviews.iter().map(|review| review.comment.as_str()));

    let mut analyzed = Vec::with_capacity(reviews.len());
    let mut scored_comments = Vec::with_capacity(reviews.len());
    let mut spam_flags = Vec::new();

    for review in reviews {
        let sentiment = sentiment::analyze(&review.comment);
        if let Some(flag) = spam::flag_for(review) {
            spam_flags.push(flag);
        }
        scored_comments.push((sentiment.score, review.comment.as_str()));
        analyzed.push(AnalyzedReview {
            review_id: review.review_id.clone(),
            rating: review.rating,
            sentiment,
            themes: themes::review_themes(&review.comment, &corpus),
        });
    }

    let summary = summarize(reviews, &analyzed, &scored_comments, spam_flags, now);
    ReviewAnalysis {
        reviews: analyzed,
        summary,
    }
}

fn summarize(
    reviews: &[NormalizedReview],
    analyzed: &[AnalyzedReview],
    scored_comments: &[(f64, &str)],
    spam_flags: Vec<SpamFlag>,
    now: DateTime<Utc>,
) -> ReviewSetSummary {
    let total = reviews.len();
    let replied = reviews.iter().filter(|review| review.has_reply()).count();

    let average_rating = if total == 0 {
        0.0
    } else {
        reviews.iter().map(|review| f64::from(review.rating)).sum::<f64>() / total as f64
    };
    let response_rate_pct = if total == 0 {
        0.0
    } else {
        replied as f64 / total as f64 * 100.0
    };

    let replies_within_48h = reviews
        .iter()
        .filter(|review| {
            matches!(review.replied_at, Some(replied_at)
                if replied_at - review.created_at <= Duration::hours(48))
        })
        .count() as u32;
    let unreplied_older_than_7d = reviews
        .iter()
        .filter(|review| !review.has_reply() && now - review.created_at > Duration::days(7))
        .count() as u32;

    ReviewSetSummary {
        total_reviews: total as u32,
        average_rating,
        response_rate_pct,
        replies_within_48h,
        unreplied_older_than_7d,
        sentiment_distribution: sentiment_distribution(analyzed),
        common_themes: common_themes(analyzed),
        theme_buckets: themes::bucket_themes(scored_comments),
        spam_flags,
    }
}

fn sentiment_distribution(analyzed: &[AnalyzedReview]) -> BTreeMap<SentimentLabel, u8> {
    let total = analyzed.len();
    SentimentLabel::ordered()
        .into_iter()
        .map(|label| {
            let count = analyzed
                .iter()
                .filter(|review| review.sentiment.label == label)
                .count();
            let pct = if total == 0 {
                0
            } else {
                (count as f64 / total as f64 * 100.0).round() as u8
            };
            (label, pct)
        })
        .collect()
}

fn common_themes(analyzed: &[AnalyzedReview]) -> Vec<CommonTheme> {
    let mut tallies: BTreeMap<&str, (u32, f64)> = BTreeMap::new();
    for review in analyzed {
        for theme in &review.themes {
            let entry = tallies.entry(theme.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += review.sentiment.score;
        }
    }

    let mut common: Vec<CommonTheme> = tallies
        .into_iter()
        .filter(|(_, (count, _))| *count > 1)
        .map(|(theme, (count, score_sum))| CommonTheme {
            theme: theme.to_string(),
            count,
            avg_sentiment: score_sum / f64::from(count),
        })
        .collect();
    common.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.theme.cmp(&b.theme)));
    common.truncate(5);
    common
}
