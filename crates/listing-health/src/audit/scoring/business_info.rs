//! Business Info: twelve completeness checks over the extended attributes.
//!
//! The score is simply the share of passing checks. Composite checks
//! (description, contact, hours, media) pass only when every sub-aspect
//! holds, but each failing sub-aspect gets its own recommendation so the
//! advice stays actionable.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::reviews::looks_promotional;
use crate::audit::signals::{BusinessAttributes, NormalizedBusinessInfo};

const CATEGORY: Category = Category::BusinessInfo;
const CHECK_COUNT: u32 = 12;

pub(crate) fn score(
    business: &NormalizedBusinessInfo,
    attributes: &BusinessAttributes,
) -> CategoryScoreResult {
    let mut passed = 0u32;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    // 1. Real-world business name, no stuffed keywords.
    if attributes.name_matches_storefront {
        passed += 1;
        checks.push(pass(
            "business_name",
            "matches the storefront name",
            "the exact real-world business name",
        ));
    } else {
        checks.push(fail(
            "business_name",
            "differs from the storefront or carries extra keywords",
            "the exact real-world business name",
            "Use the exact real-world name",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Listing name does not match the storefront",
            "Rename the listing to the exact real-world business name, with no added keywords",
            "Name edits that read as keyword stuffing can get a listing suspended",
        ));
    }

    // 2. Category selection.
    if attributes.categories_relevant {
        passed += 1;
        checks.push(pass(
            "categories",
            "categories fit the business",
            "a relevant primary and secondary category set",
        ));
    } else {
        checks.push(fail(
            "categories",
            "categories drift from what the business does",
            "a relevant primary and secondary category set",
            "Correct the category selection",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Listed categories do not fit the business",
            "Set the primary category to the core service and trim unrelated secondary ones",
            "Category choice decides which searches the listing can appear in at all",
        ));
    }

    // 3. Services catalog.
    if attributes.services_complete {
        passed += 1;
        checks.push(pass(
            "services",
            "service list filled in",
            "every offered service listed",
        ));
    } else {
        checks.push(fail(
            "services",
            "service list has gaps",
            "every offered service listed",
            "Complete the service list",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "The services catalog is incomplete",
            "Add every offered service with a short description and price range",
            "Service entries match the listing to long-tail service searches",
        ));
    }

    // 4. Identity attributes.
    if attributes.has_identity_attributes {
        passed += 1;
        checks.push(pass(
            "identity_attributes",
            "identity attributes set",
            "applicable identity attributes selected",
        ));
    } else {
        checks.push(fail(
            "identity_attributes",
            "no identity attributes set",
            "applicable identity attributes selected",
            "Select applicable attributes",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Medium,
            "No identity attributes are selected",
            "Select the ownership and accessibility attributes that apply",
            "Attribute filters route a growing share of discovery searches",
        ));
    }

    // 5. Description quality. Length, keyword use, and no promotional
    // content are all required for the check to pass.
    let description_len = business.description.chars().count();
    let long_enough = description_len >= 750;
    let keyworded = attributes.description_mentions_keywords;
    let non_promotional = !looks_promotional(&business.description);
    if long_enough && keyworded && non_promotional {
        passed += 1;
        checks.push(pass(
            "description",
            format!("{description_len} characters, keyworded, no promotional content"),
            "750+ characters mentioning core services, free of promotional content",
        ));
    } else {
        let mut shortfalls = Vec::new();
        if !long_enough {
            shortfalls.push("too short");
        }
        if !keyworded {
            shortfalls.push("missing service keywords");
        }
        if !non_promotional {
            shortfalls.push("promotional content");
        }
        checks.push(fail(
            "description",
            format!("{description_len} characters ({})", shortfalls.join(", ")),
            "750+ characters mentioning core services, free of promotional content",
            "Rework the description",
        ));
        if !long_enough {
            recommendations.push(rec(
                CATEGORY,
                Priority::High,
                "Business description is below the minimum length",
                format!(
                    "Add {} more characters to your description",
                    750 - description_len
                ),
                "Short descriptions give the ranking engine little to match on",
            ));
        }
        if !keyworded {
            recommendations.push(rec(
                CATEGORY,
                Priority::High,
                "Description never mentions the tracked services",
                "Mention your core services and keywords in the description",
                "Descriptions are indexed; unmentioned services go unmatched",
            ));
        }
        if !non_promotional {
            recommendations.push(rec(
                CATEGORY,
                Priority::High,
                "Description reads as promotional",
                "Remove links, prices, and promotional offers from the description",
                "Promotional descriptions violate listing guidelines and risk takedown",
            ));
        }
    }

    // 6. Opening date.
    if attributes.opening_date.is_some() {
        passed += 1;
        checks.push(pass(
            "opening_date",
            "opening date on record",
            "an opening date",
        ));
    } else {
        checks.push(fail(
            "opening_date",
            "no opening date",
            "an opening date",
            "Add the opening date",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Low,
            "Opening date is missing",
            "Add the month and year the business opened",
            "Longevity is a trust signal shown directly on the listing",
        ));
    }

    // 7. Contact surface: local phone, chat, and a matching website.
    let contact_ok = attributes.has_local_phone
        && attributes.has_chat_enabled
        && attributes.website_links_match;
    if contact_ok {
        passed += 1;
        checks.push(pass(
            "contact",
            "local phone, chat, and matching website",
            "a local phone, chat enabled, and a website that matches the business",
        ));
    } else {
        let mut gaps = Vec::new();
        if !attributes.has_local_phone {
            gaps.push("no local phone");
        }
        if !attributes.has_chat_enabled {
            gaps.push("chat off");
        }
        if !attributes.website_links_match {
            gaps.push("website mismatch");
        }
        checks.push(fail(
            "contact",
            gaps.join(", "),
            "a local phone, chat enabled, and a website that matches the business",
            "Complete the contact surface",
        ));
        if !attributes.has_local_phone {
            recommendations.push(rec(
                CATEGORY,
                Priority::High,
                "Listing phone is not a local number",
                "Use a local phone number instead of a call center line",
                "Local area codes are weighed in proximity ranking",
            ));
        }
        if !attributes.has_chat_enabled {
            recommendations.push(rec(
                CATEGORY,
                Priority::Low,
                "Chat is switched off",
                "Enable chat so searchers can message the business directly",
                "Listings with chat capture questions that would otherwise bounce",
            ));
        }
        if !attributes.website_links_match {
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "Website link does not match the business",
                "Point the listing at the site for this exact location",
                "Mismatched links read as inconsistency to both users and ranking",
            ));
        }
    }

    // 8. Social profiles.
    if attributes.social_profiles_consistent {
        passed += 1;
        checks.push(pass(
            "social_profiles",
            "social profiles consistent",
            "consistent linked social profiles",
        ));
    } else {
        checks.push(fail(
            "social_profiles",
            "social profiles inconsistent or missing",
            "consistent linked social profiles",
            "Align social profile links",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::Low,
            "Linked social profiles are inconsistent",
            "Link the active social profiles and retire the stale ones",
            "Consistent profiles corroborate the listing identity",
        ));
    }

    // 9. Map pin.
    if attributes.location_pin_accurate {
        passed += 1;
        checks.push(pass(
            "location",
            "map pin on the storefront",
            "a map pin placed on the storefront",
        ));
    } else {
        checks.push(fail(
            "location",
            "map pin off the storefront",
            "a map pin placed on the storefront",
            "Correct the map pin",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Map pin is not on the storefront",
            "Drag the map pin onto the actual entrance",
            "A misplaced pin sends customers to the wrong door and hurts proximity",
        ));
    }

    // 10. Hours: full weekly schedule plus special hours.
    let hours_ok = attributes.hours_complete && attributes.has_special_hours;
    if hours_ok {
        passed += 1;
        checks.push(pass(
            "hours",
            "weekly and special hours set",
            "complete weekly hours plus special hours",
        ));
    } else {
        let mut gaps = Vec::new();
        if !attributes.hours_complete {
            gaps.push("weekly hours incomplete");
        }
        if !attributes.has_special_hours {
            gaps.push("no special hours");
        }
        checks.push(fail(
            "hours",
            gaps.join(", "),
            "complete weekly hours plus special hours",
            "Finish the hours schedule",
        ));
        if !attributes.hours_complete {
            recommendations.push(rec(
                CATEGORY,
                Priority::High,
                "Weekly hours are incomplete",
                "Fill in opening hours for every day of the week",
                "Missing hours suppress the open-now filter entirely",
            ));
        }
        if !attributes.has_special_hours {
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "No special hours set for holidays",
                "Add special hours for the next public holidays",
                "Wrong holiday hours are a reliable source of one-star reviews",
            ));
        }
    }

    // 11. Media: photos, a video, and a virtual tour.
    let media_ok =
        business.photo_count >= 5 && attributes.video_count >= 1 && attributes.has_virtual_tour;
    if media_ok {
        passed += 1;
        checks.push(pass(
            "media",
            format!(
                "{} photos, {} videos, virtual tour attached",
                business.photo_count, attributes.video_count
            ),
            "at least 5 photos, a video, and a virtual tour",
        ));
    } else {
        let mut gaps = Vec::new();
        if business.photo_count < 5 {
            gaps.push("fewer than 5 photos");
        }
        if attributes.video_count == 0 {
            gaps.push("no video");
        }
        if !attributes.has_virtual_tour {
            gaps.push("no virtual tour");
        }
        checks.push(fail(
            "media",
            gaps.join(", "),
            "at least 5 photos, a video, and a virtual tour",
            "Round out the media gallery",
        ));
        if business.photo_count < 5 {
            recommendations.push(rec(
                CATEGORY,
                Priority::High,
                "Media gallery holds fewer than five photos",
                "Upload at least five photos covering the storefront, interior, and work",
                "Thin galleries depress both ranking and conversion",
            ));
        }
        if attributes.video_count == 0 {
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                "No video in the media gallery",
                "Add a short introduction or walkthrough video",
                "Video keeps visitors on the listing longer",
            ));
        }
        if !attributes.has_virtual_tour {
            recommendations.push(rec(
                CATEGORY,
                Priority::Low,
                "No virtual tour attached",
                "Commission a virtual tour of the premises",
                "Tours differentiate the listing from every rival without one",
            ));
        }
    }

    // 12. NAP consistency across sources.
    if attributes.nap_consistent {
        passed += 1;
        checks.push(pass(
            "nap_consistency",
            "name, address, and phone agree across sources",
            "identical name, address, and phone everywhere",
        ));
    } else {
        checks.push(fail(
            "nap_consistency",
            "name, address, or phone differs across sources",
            "identical name, address, and phone everywhere",
            "Reconcile listing data across sources",
        ));
        recommendations.push(rec(
            CATEGORY,
            Priority::High,
            "Name, address, and phone are inconsistent across sources",
            "Reconcile the listing data on every directory to one canonical version",
            "NAP inconsistency is a classic trust-eroding ranking drag",
        ));
    }

    let score = (f64::from(passed) / f64::from(CHECK_COUNT) * 100.0).round() as u8;
    CategoryScoreResult {
        category: CATEGORY,
        score,
        checks,
        recommendations,
    }
}
