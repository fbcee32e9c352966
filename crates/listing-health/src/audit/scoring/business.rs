//! Business Details: completeness and freshness of the public listing card.

use chrono::{DateTime, Utc};

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::NormalizedBusinessInfo;

const CATEGORY: Category = Category::BusinessDetails;

pub(crate) fn score(
    business: &NormalizedBusinessInfo,
    now: DateTime<Utc>,
) -> CategoryScoreResult {
    let mut score = 0u32;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    // Core contact fields: all three or a reduced credit for two.
    let mut missing: Vec<&str> = Vec::new();
    for (value, label) in [
        (&business.name, "name"),
        (&business.address, "address"),
        (&business.phone, "phone"),
    ] {
        if value.trim().is_empty() {
            missing.push(label);
        }
    }
    let present = 3 - missing.len();
    if missing.is_empty() {
        score += 20;
        checks.push(pass(
            "core_fields",
            "name, address, and phone on file",
            "all three core contact fields",
        ));
    } else {
        if present == 2 {
            score += 10;
        }
        let gap = missing.join(" and ");
        checks.push(fail(
            "core_fields",
            format!("{present} of 3 core contact fields"),
            "all three core contact fields",
            format!("Add the missing {gap}"),
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Core contact details are incomplete",
            format!("Fill in the listing {gap}"),
            "Listings without complete contact details are dropped from many search surfaces",
        ));
    }

    // Description length, counted in characters.
    let description_len = business.description.chars().count();
    if description_len >= 750 {
        score += 25;
        checks.push(pass(
            "description",
            format!("{description_len} characters"),
            "750 characters or more",
        ));
    } else {
        if description_len >= 500 {
            score += 15;
        } else if description_len >= 250 {
            score += 10;
        }
        checks.push(fail(
            "description",
            format!("{description_len} characters"),
            "750 characters or more",
            "Expand the business description",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Business description is too short",
            format!(
                "Expand the description to at least 750 characters (currently {description_len})"
            ),
            "Longer descriptions give the ranking engine more terms to match against",
        ));
    }

    // Photo volume.
    if business.photo_count >= 10 {
        score += 20;
        checks.push(pass(
            "photos",
            format!("{} photos", business.photo_count),
            "10 photos or more",
        ));
    } else {
        if business.photo_count >= 5 {
            score += 15;
        } else if business.photo_count >= 1 {
            score += 5;
        }
        checks.push(fail(
            "photos",
            format!("{} photos", business.photo_count),
            "10 photos or more",
            "Upload more photos",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "Listing carries too few photos",
            format!(
                "Upload at least {} more photos of the storefront, team, and work",
                10 - business.photo_count.min(10)
            ),
            "Listings with ten or more photos convert noticeably better",
        ));
    }

    // Opening hours confirmed recently.
    let hours_age_days = business
        .hours_updated_at
        .map(|updated_at| (now - updated_at).num_days());
    match hours_age_days {
        Some(age) if age <= 30 => {
            score += 15;
            checks.push(pass(
                "hours_freshness",
                format!("confirmed {age} days ago"),
                "confirmed within 30 days",
            ));
        }
        Some(age) => {
            if age <= 90 {
                score += 10;
            } else if age <= 180 {
                score += 5;
            }
            checks.push(fail(
                "hours_freshness",
                format!("confirmed {age} days ago"),
                "confirmed within 30 days",
                "Reconfirm opening hours",
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "Opening hours have not been confirmed recently",
                "Review and reconfirm the listed opening hours",
                "Stale hours are a leading cause of negative reviews",
            ));
        }
        None => {
            checks.push(fail(
                "hours_freshness",
                "never confirmed",
                "confirmed within 30 days",
                "Set and confirm opening hours",
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "Opening hours were never confirmed",
                "Set the opening hours and confirm them",
                "Stale hours are a leading cause of negative reviews",
            ));
        }
    }

    // Website link.
    let has_website = business
        .website
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if has_website {
        score += 20;
        checks.push(pass("website", "website linked", "a working website link"));
    } else {
        checks.push(fail(
            "website",
            "no website linked",
            "a working website link",
            "Link a website",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "No website is linked to the listing",
            "Add the business website or a booking page link",
            "A linked site captures visitors who want details the listing does not show",
        ));
    }

    CategoryScoreResult {
        category: CATEGORY,
        score: score.min(100) as u8,
        checks,
        recommendations,
    }
}
