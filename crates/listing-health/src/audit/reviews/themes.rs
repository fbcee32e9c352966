use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::lexicon;

/// Bucketed talking points for the whole review set, keyed by the
/// sentiment band each source comment fell into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeBuckets {
    pub positive: Vec<String>,
    pub neutral: Vec<String>,
    pub negative: Vec<String>,
}

fn is_theme_word(token: &str) -> bool {
    token.len() > 3 && !lexicon::is_stopword(token)
}

fn is_bigram_word(token: &str) -> bool {
    token.len() > 2 && !lexicon::is_stopword(token)
}

/// Count every qualifying token occurrence across the whole corpus.
pub(crate) fn corpus_frequencies<'a, I>(comments: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut frequencies = HashMap::new();
    for comment in comments {
        for token in lexicon::tokenize(comment) {
            if is_theme_word(&token) {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }
    }
    frequencies
}

/// Top three themes for one comment: its distinct qualifying tokens,
/// ranked by corpus-wide frequency, alphabetical on ties.
pub(crate) fn review_themes(comment: &str, corpus: &HashMap<String, usize>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for token in lexicon::tokenize(comment) {
        if is_theme_word(&token) && !candidates.contains(&token) {
            candidates.push(token);
        }
    }

    candidates.sort_by(|a, b| {
        let freq_a = corpus.get(a).copied().unwrap_or(0);
        let freq_b = corpus.get(b).copied().unwrap_or(0);
        freq_b.cmp(&freq_a).then_with(|| a.cmp(b))
    });
    candidates.truncate(3);
    candidates
}

/// Build the positive/neutral/negative theme tables from scored comments.
///
/// Each bucket ranks adjacent-word phrases ahead of single words, keeps
/// only terms seen more than once inside the bucket, and caps the result
/// at ten entries (five phrases, then five words).
pub(crate) fn bucket_themes(scored_comments: &[(f64, &str)]) -> ThemeBuckets {
    let mut positive: Vec<&str> = Vec::new();
    let mut neutral: Vec<&str> = Vec::new();
    let mut negative: Vec<&str> = Vec::new();

    for (score, comment) in scored_comments {
        if *score > 0.2 {
            positive.push(comment);
        } else if *score < -0.2 {
            negative.push(comment);
        } else {
            neutral.push(comment);
        }
    }

    ThemeBuckets {
        positive: bucket_terms(&positive),
        neutral: bucket_terms(&neutral),
        negative: bucket_terms(&negative),
    }
}

fn bucket_terms(comments: &[&str]) -> Vec<String> {
    let mut phrase_counts: HashMap<String, usize> = HashMap::new();
    let mut word_counts: HashMap<String, usize> = HashMap::new();

    for comment in comments {
        let tokens = lexicon::tokenize(comment);
        for pair in tokens.windows(2) {
            if is_bigram_word(&pair[0]) && is_bigram_word(&pair[1]) {
                let phrase = format!("{} {}", pair[0], pair[1]);
                *phrase_counts.entry(phrase).or_insert(0) += 1;
            }
        }
        for token in tokens {
            if is_theme_word(&token) {
                *word_counts.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut terms = top_terms(phrase_counts, 5);
    let words = top_terms(word_counts, 5);
    for word in words {
        if !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms.truncate(10);
    terms
}

fn top_terms(counts: HashMap<String, usize>, limit: usize) -> Vec<String> {
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(term, _)| term).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_frequencies_count_every_occurrence() {
        let corpus = corpus_frequencies(["great coffee coffee", "coffee again"]);
        assert_eq!(corpus.get("coffee"), Some(&3));
        assert_eq!(corpus.get("great"), Some(&1));
        assert_eq!(corpus.get("again"), None, "stopwords are excluded");
    }

    #[test]
    fn review_themes_rank_by_corpus_frequency_then_alpha() {
        let corpus = corpus_frequencies([
            "coffee coffee coffee",
            "staff staff",
            "bagel",
            "coffee staff bagel muffin",
        ]);
        let themes = review_themes("coffee staff bagel muffin", &corpus);
        assert_eq!(themes, vec!["coffee", "staff", "bagel"]);
    }

    #[test]
    fn review_themes_break_frequency_ties_alphabetically() {
        let corpus = corpus_frequencies(["zebra apple", "zebra apple"]);
        let themes = review_themes("zebra apple", &corpus);
        assert_eq!(themes, vec!["apple", "zebra"]);
    }

    #[test]
    fn bucket_thresholds_split_on_point_two() {
        let buckets = bucket_themes(&[
            (0.25, "espresso espresso machine espresso machine"),
            (0.2, "lobby lobby seating lobby seating"),
            (-0.2, "lobby lobby seating lobby seating"),
            (-0.25, "parking parking trouble parking trouble"),
        ]);

        assert!(buckets.positive.iter().any(|t| t == "espresso machine"));
        assert!(buckets.neutral.iter().any(|t| t == "lobby seating"));
        assert!(buckets.negative.iter().any(|t| t == "parking trouble"));
    }

    #[test]
    fn bucket_terms_require_repetition() {
        let buckets = bucket_themes(&[(0.5, "singular mention of unique service")]);
        assert!(buckets.positive.is_empty());
    }

    #[test]
    fn bucket_phrases_rank_ahead_of_words() {
        let comments = vec![
            (0.6, "patio seating was lovely"),
            (0.7, "patio seating again lovely"),
        ];
        let buckets = bucket_themes(&comments);
        assert_eq!(buckets.positive.first().map(String::as_str), Some("patio seating"));
        assert!(buckets.positive.len() <= 10);
    }
}
