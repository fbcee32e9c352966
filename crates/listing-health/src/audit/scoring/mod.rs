//! Category scorers.
//!
//! Each scorer is a pure function from normalized signals to a
//! [`CategoryScoreResult`]: a 0-100 score, the check trail behind it, and
//! the recommendations for whatever failed. [`score_all`] runs them in
//! report order, skipping optional categories whose signal block is
//! absent. A block that is present but empty still scores; absence means
//! the category was never audited.

mod business;
mod business_info;
mod competitors;
mod duplicates;
mod keywords;
mod performance;
mod photos;
mod posts;
mod qna;
mod reviews;

use chrono::{DateTime, Utc};

use super::domain::{
    Category, CategoryCheck, CategoryScoreResult, CheckStatus, Priority, Recommendation,
};
use super::reviews::ReviewAnalysis;
use super::signals::AuditSignals;

/// Score every audited category in report order.
pub(crate) fn score_all(
    signals: &AuditSignals,
    analysis: &ReviewAnalysis,
    now: DateTime<Utc>,
) -> Vec<CategoryScoreResult> {
    let mut results = Vec::with_capacity(Category::ordered().len());

    results.push(business::score(&signals.business, now));
    results.push(reviews::score(&analysis.summary));
    results.push(posts::score(
        &signals.posts,
        signals.post_enrichment.as_ref(),
        now,
    ));
    results.push(competitors::score(
        signals.reviews.len() as u32,
        analysis.summary.average_rating,
        signals.posts.len() as u32,
        &signals.competitors,
    ));

    if let Some(attributes) = &signals.attributes {
        results.push(business_info::score(&signals.business, attributes));
    }
    if let Some(metrics) = &signals.performance {
        results.push(performance::score(metrics));
    }
    if let Some(photo_audit) = &signals.photos {
        results.push(photos::score(photo_audit));
    }
    if let Some(questions) = &signals.qna {
        results.push(qna::score(questions));
    }
    if let Some(usage) = &signals.keywords {
        results.push(keywords::score(usage));
    }
    if let Some(listings) = &signals.duplicates {
        results.push(duplicates::score(listings));
    }

    results
}

pub(crate) fn pass(
    field: &str,
    observed: impl Into<String>,
    expected: impl Into<String>,
) -> CategoryCheck {
    CategoryCheck {
        field: field.to_string(),
        status: CheckStatus::Pass,
        observed: observed.into(),
        expected: expected.into(),
        recommendation: None,
    }
}

pub(crate) fn fail(
    field: &str,
    observed: impl Into<String>,
    expected: impl Into<String>,
    recommendation: impl Into<String>,
) -> CategoryCheck {
    CategoryCheck {
        field: field.to_string(),
        status: CheckStatus::Fail,
        observed: observed.into(),
        expected: expected.into(),
        recommendation: Some(recommendation.into()),
    }
}

pub(crate) fn rec(
    category: Category,
    priority: Priority,
    description: impl Into<String>,
    action: impl Into<String>,
    impact: impl Into<String>,
) -> Recommendation {
    Recommendation {
        category,
        priority,
        description: description.into(),
        action: action.into(),
        impact: impact.into(),
    }
}
