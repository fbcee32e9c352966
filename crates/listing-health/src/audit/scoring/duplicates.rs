//! Duplicates: penalty per suspected duplicate listing.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::NormalizedDuplicateListing;

const CATEGORY: Category = Category::Duplicates;

const PENALTY_PER_DUPLICATE: i64 = 30;

pub(crate) fn score(duplicates: &[NormalizedDuplicateListing]) -> CategoryScoreResult {
    let score = (100 - PENALTY_PER_DUPLICATE * duplicates.len() as i64).max(0) as u8;

    let mut checks = Vec::new();
    if duplicates.is_empty() {
        checks.push(pass(
            "duplicate_listings",
            "no duplicates found",
            "a single canonical listing",
        ));
    } else {
        checks.push(fail(
            "duplicate_listings",
            format!("{} suspected duplicates", duplicates.len()),
            "a single canonical listing",
            "Merge or remove the duplicates",
        ));
    }

    let recommendations = duplicates
        .iter()
        .map(|duplicate| {
            rec(
                CATEGORY,
                Priority::High,
                format!(
                    "Suspected duplicate \"{}\" on {}",
                    duplicate.listing_name, duplicate.source
                ),
                format!(
                    "Request a merge or removal of the {} listing at {}",
                    duplicate.source, duplicate.address
                ),
                "Duplicates split reviews and confuse both customers and ranking",
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
