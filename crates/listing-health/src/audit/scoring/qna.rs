//! Q&A: share of listing questions left unanswered.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::NormalizedQna;

const CATEGORY: Category = Category::Qna;

pub(crate) fn score(qna: &NormalizedQna) -> CategoryScoreResult {
    let unanswered_share =
        f64::from(qna.unanswered) / f64::from(qna.total.max(1)) * 100.0;
    let score = (100.0 - unanswered_share).round() as u8;

    let mut checks = Vec::new();
    if qna.unanswered == 0 {
        checks.push(pass(
            "unanswered_questions",
            format!("0 of {} questions unanswered", qna.total),
            "every question answered",
        ));
    } else {
        checks.push(fail(
            "unanswered_questions",
            format!("{} of {} questions unanswered", qna.unanswered, qna.total),
            "every question answered",
            "Answer the open questions",
        ));
    }

    let recommendations = qna
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
        score,
        checks,
        recommendations,
    }
}
