//! Weighted aggregation of category scores into the overall score.
//!
//! Two explicit weight profiles exist instead of arithmetic scattered at
//! call sites: the legacy four-category split and the extended ten-way
//! split used as soon as any optional category was audited. A category
//! missing from a run simply contributes nothing; weights are never
//! renormalized over the categories that happen to be present.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::Category;

/// Which weight table applied to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    Legacy,
    Extended,
}

const LEGACY_WEIGHTS: &[(Category, f64)] = &[
    (Category::BusinessDetails, 0.30),
    (Category::Reviews, 0.30),
    (Category::Posts, 0.25),
    (Category::Competitors, 0.15),
];

const EXTENDED_WEIGHTS: &[(Category, f64)] = &[
    (Category::BusinessDetails, 0.10),
    (Category::Reviews, 0.15),
    (Category::Posts, 0.10),
    (Category::Competitors, 0.05),
    (Category::BusinessInfo, 0.15),
    (Category::Performance, 0.15),
    (Category::Photos, 0.10),
    (Category::Qna, 0.05),
    (Category::Keywords, 0.10),
    (Category::Duplicates, 0.05),
];

impl WeightProfile {
    /// Extended applies as soon as any non-core category was audited.
    pub fn select<'a, I>(populated: I) -> Self
    where
        I: IntoIterator<Item = &'a Category>,
    {
        let extended = populated.into_iter().any(|category| !category.is_core());
        if extended {
            WeightProfile::Extended
        } else {
            WeightProfile::Legacy
        }
    }

    pub const fn weights(self) -> &'static [(Category, f64)] {
        match self {
            WeightProfile::Legacy => LEGACY_WEIGHTS,
            WeightProfile::Extended => EXTENDED_WEIGHTS,
        }
    }

    /// Zero for categories the profile does not weigh.
    pub fn weight_for(self, category: Category) -> f64 {
        self.weights()
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, weight)| *weight)
            .unwrap_or(0.0)
    }

    pub const fn label(self) -> &'static str {
        match self {
            WeightProfile::Legacy => "legacy",
            WeightProfile::Extended => "extended",
        }
    }
}

/// Weighted overall score for the run, or `None` when no category scored.
pub(crate) fn overall_score(scores: &BTreeMap<Category, u8>) -> Option<(u8, WeightProfile)> {
    if scores.is_empty() {
        return None;
    }

    let profile = WeightProfile::select(scores.keys());
    let total: f64 = scores
        .iter()
        .map(|(category, score)| f64::from(*score) * profile.weight_for(*category))
        .sum();
    Some((total.round() as u8, profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_scores() -> BTreeMap<Category, u8> {
        BTreeMap::from([
            (Category::BusinessDetails, 80),
            (Category::Reviews, 90),
            (Category::Posts, 70),
            (Category::Competitors, 60),
        ])
    }

    #[test]
    fn both_profiles_weigh_to_one() {
        for profile in [WeightProfile::Legacy, WeightProfile::Extended] {
            let sum: f64 = profile.weights().iter().map(|(_, weight)| weight).sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "{} profile sums to {sum}",
                profile.label()
            );
        }
    }

    #[test]
    fn core_only_runs_use_the_legacy_profile() {
        let (score, profile) = overall_score(&core_scores()).expect("scores present");
        assert_eq!(profile, WeightProfile::Legacy);
        // 80*0.30 + 90*0.30 + 70*0.25 + 60*0.15 = 77.5, rounded up.
        assert_eq!(score, 78);
    }

    #[test]
    fn any_optional_category_switches_to_extended() {
        let mut scores = core_scores();
        scores.insert(Category::Qna, 100);

        let (score, profile) = overall_score(&scores).expect("scores present");
        assert_eq!(profile, WeightProfile::Extended);
        // 80*0.10 + 90*0.15 + 70*0.10 + 60*0.05 + 100*0.05 = 36.5, and the
        // seven absent categories contribute nothing.
        assert_eq!(score, 37);
    }

    #[test]
    fn absent_categories_never_renormalize_the_rest() {
        let scores = BTreeMap::from([(Category::Reviews, 100u8), (Category::Photos, 100u8)]);
        let (score, profile) = overall_score(&scores).expect("scores present");
        assert_eq!(profile, WeightProfile::Extended);
        assert_eq!(score, 25);
    }

    #[test]
    fn empty_category_set_yields_nothing() {
        assert!(overall_score(&BTreeMap::new()).is_none());
    }

    #[test]
    fn result_is_independent_of_insertion_order() {
        let mut forward = BTreeMap::new();
        forward.insert(Category::BusinessDetails, 80u8);
        forward.insert(Category::Reviews, 90u8);
        forward.insert(Category::Posts, 70u8);
        forward.insert(Category::Competitors, 60u8);

        let mut reverse = BTreeMap::new();
        reverse.insert(Category::Competitors, 60u8);
        reverse.insert(Category::Posts, 70u8);
        reverse.insert(Category::Reviews, 90u8);
        reverse.insert(Category::BusinessDetails, 80u8);

        assert_eq!(overall_score(&forward), overall_score(&reverse));
    }
}
