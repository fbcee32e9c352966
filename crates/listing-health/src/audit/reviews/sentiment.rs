use serde::{Deserialize, Serialize};

use super::lexicon;

/// Sentiment classification bands, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    HighlyPositive,
    Positive,
    Neutral,
    Negative,
    HighlyNegative,
}

impl SentimentLabel {
    pub const fn ordered() -> [SentimentLabel; 5] {
        [
            SentimentLabel::HighlyPositive,
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
            SentimentLabel::HighlyNegative,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            SentimentLabel::HighlyPositive => "highly_positive",
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
            SentimentLabel::HighlyNegative => "highly_negative",
        }
    }
}

/// Normalized sentiment for one comment.
///
/// `score` is the polarity sum over lexicon hits divided by the sum of
/// their absolute weights, so it stays in [-1, 1] and moves monotonically
/// with the positive share of matched terms. `magnitude` doubles the
/// absolute score as a 0-2 strength gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub magnitude: f64,
    pub label: SentimentLabel,
}

pub fn analyze(comment: &str) -> SentimentResult {
    let mut polarity_sum = 0i32;
    let mut weight_sum = 0i32;

    for token in lexicon::tokenize(comment) {
        if let Some(polarity) = lexicon::polarity(&lexicon::stem(&token)) {
            polarity_sum += polarity;
            weight_sum += polarity.abs();
        }
    }

    let score = if weight_sum == 0 {
        0.0
    } else {
        f64::from(polarity_sum) / f64::from(weight_sum)
    };

    SentimentResult {
        score,
        magnitude: score.abs() * 2.0,
        label: label_for(score),
    }
}

pub(crate) fn label_for(score: f64) -> SentimentLabel {
    if score > 0.6 {
        SentimentLabel::HighlyPositive
    } else if score > 0.3 {
        SentimentLabel::Positive
    } else if score < -0.6 {
        SentimentLabel::HighlyNegative
    } else if score < -0.3 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniformly_positive_comment_scores_one() {
        let result = analyze("Excellent amazing wonderful visit");
        assert!((result.score - 1.0).abs() < f64::EPSILON);
        assert!((result.magnitude - 2.0).abs() < f64::EPSILON);
        assert_eq!(result.label, SentimentLabel::HighlyPositive);
    }

    #[test]
    fn balanced_comment_is_neutral() {
        let result = analyze("great food bad service");
        assert!(result.score.abs() < f64::EPSILON);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn no_lexicon_hits_is_neutral_zero() {
        let result = analyze("parked outside and walked in");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.magnitude, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn label_bands_are_exclusive_at_boundaries() {
        assert_eq!(label_for(0.65), SentimentLabel::HighlyPositive);
        assert_eq!(label_for(0.6), SentimentLabel::Positive);
        assert_eq!(label_for(0.3), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.3), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.6), SentimentLabel::Negative);
        assert_eq!(label_for(-0.65), SentimentLabel::HighlyNegative);
    }

    #[test]
    fn score_rises_with_positive_share() {
        let mixed = analyze("good coffee but slow rude staff");
        let better = analyze("good coffee friendly helpful staff");
        assert!(better.score > mixed.score);
    }

    #[test]
    fn strong_terms_outweigh_mild_ones() {
        let mild = analyze("good visit, slow checkout");
        let strong = analyze("amazing visit, slow checkout");
        assert!(strong.score > mild.score);
    }
}
