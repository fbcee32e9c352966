use std::collections::HashMap;
use std::sync::OnceLock;

/// Surface-form sentiment vocabulary tuned for local business reviews.
/// Strong terms carry double weight. Keys are stemmed when the lookup
/// table is built so inflected tokens land on the same entry.
const SENTIMENT_TERMS: &[(&str, i32)] = &[
    ("excellent", 2),
    ("amazing", 2),
    ("outstanding", 2),
    ("fantastic", 2),
    ("wonderful", 2),
    ("awesome", 2),
    ("perfect", 2),
    ("exceptional", 2),
    ("incredible", 2),
    ("superb", 2),
    ("phenomenal", 2),
    ("delightful", 2),
    ("good", 1),
    ("great", 1),
    ("nice", 1),
    ("friendly", 1),
    ("helpful", 1),
    ("clean", 1),
    ("fresh", 1),
    ("fast", 1),
    ("quick", 1),
    ("professional", 1),
    ("tasty", 1),
    ("delicious", 1),
    ("affordable", 1),
    ("reasonable", 1),
    ("reliable", 1),
    ("recommend", 1),
    ("recommended", 1),
    ("love", 1),
    ("loved", 1),
    ("pleasant", 1),
    ("courteous", 1),
    ("attentive", 1),
    ("prompt", 1),
    ("knowledgeable", 1),
    ("happy", 1),
    ("satisfied", 1),
    ("best", 1),
    ("enjoyable", 1),
    ("enjoyed", 1),
    ("welcoming", 1),
    ("welcome", 1),
    ("polite", 1),
    ("honest", 1),
    ("fair", 1),
    ("cozy", 1),
    ("comfortable", 1),
    ("convenient", 1),
    ("spotless", 1),
    ("generous", 1),
    ("skilled", 1),
    ("thorough", 1),
    ("responsive", 1),
    ("bad", -1),
    ("slow", -1),
    ("dirty", -1),
    ("rude", -1),
    ("expensive", -1),
    ("overpriced", -1),
    ("disappointing", -1),
    ("disappointed", -1),
    ("mediocre", -1),
    ("stale", -1),
    ("cold", -1),
    ("noisy", -1),
    ("crowded", -1),
    ("unprofessional", -1),
    ("unhelpful", -1),
    ("poor", -1),
    ("bland", -1),
    ("cramped", -1),
    ("late", -1),
    ("unresponsive", -1),
    ("pricey", -1),
    ("annoying", -1),
    ("frustrating", -1),
    ("broken", -1),
    ("messy", -1),
    ("grumpy", -1),
    ("careless", -1),
    ("sloppy", -1),
    ("unfriendly", -1),
    ("underwhelming", -1),
    ("terrible", -2),
    ("horrible", -2),
    ("awful", -2),
    ("disgusting", -2),
    ("worst", -2),
    ("atrocious", -2),
    ("appalling", -2),
    ("dreadful", -2),
    ("scam", -2),
    ("nightmare", -2),
    ("unacceptable", -2),
    ("filthy", -2),
    ("rancid", -2),
    ("abysmal", -2),
    ("inedible", -2),
];

/// Connective vocabulary excluded from theme candidates.
pub(crate) const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "aren", "because", "been", "before",
    "being", "could", "couldn", "didn", "doesn", "done", "during", "even",
    "ever", "every", "from", "have", "having", "here", "into", "just",
    "made", "make", "many", "more", "most", "much", "once", "only", "other",
    "over", "really", "should", "shouldn", "some", "such", "than", "that",
    "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "under", "until", "very", "wasn", "well", "went", "were",
    "weren", "what", "when", "where", "which", "while", "will", "with",
    "would", "wouldn", "your",
];

/// Keywords unrelated to any local business category. Reviews pushing
/// these are promotional by definition.
pub(crate) const OFFTOPIC_KEYWORDS: &[&str] = &[
    "crypto", "bitcoin", "loan", "diet", "viagra", "casino", "seo",
    "backlink", "followers", "escort",
];

/// Terms too generic to carry signal on their own in a one-line review.
pub(crate) const GENERIC_TERMS: &[&str] = &["good", "great", "nice", "bad", "best", "love"];

fn lexicon() -> &'static HashMap<String, i32> {
    static LEXICON: OnceLock<HashMap<String, i32>> = OnceLock::new();
    LEXICON.get_or_init(|| {
        let mut table = HashMap::with_capacity(SENTIMENT_TERMS.len());
        for (term, weight) in SENTIMENT_TERMS {
            table.insert(stem(term), *weight);
        }
        table
    })
}

/// Polarity of a stemmed token, if the lexicon knows it.
pub(crate) fn polarity(stemmed: &str) -> Option<i32> {
    lexicon().get(stemmed).copied()
}

/// Lowercase and split on non-alphanumeric boundaries.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Light suffix stripper. Deliberately conservative: a wrong merge is
/// worse than a missed one, so short stems are left alone.
pub(crate) fn stem(token: &str) -> String {
    if let Some(base) = token.strip_suffix("ies") {
        if base.len() >= 3 {
            return format!("{base}y");
        }
    }

    for suffix in ["ing", "ed", "es"] {
        if let Some(base) = token.strip_suffix(suffix) {
            if base.len() >= 4 {
                return base.to_string();
            }
        }
    }

    if let Some(base) = token.strip_suffix('s') {
        if base.len() >= 3 && !base.ends_with('s') {
            return base.to_string();
        }
    }

    token.to_string()
}

pub(crate) fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_punctuation_and_lowercases() {
        let tokens = tokenize("Great coffee, SUPER-friendly staff!");
        assert_eq!(tokens, vec!["great", "coffee", "super", "friendly", "staff"]);
    }

    #[test]
    fn stem_strips_common_suffixes() {
        assert_eq!(stem("amazing"), "amaz");
        assert_eq!(stem("recommended"), "recommend");
        assert_eq!(stem("cookies"), "cooky");
        assert_eq!(stem("loves"), "love");
        assert_eq!(stem("staff"), "staff");
    }

    #[test]
    fn stem_leaves_short_bases_alone() {
        assert_eq!(stem("bed"), "bed");
        assert_eq!(stem("ties"), "tie");
        assert_eq!(stem("gas"), "gas");
        assert_eq!(stem("loved"), "loved");
    }

    #[test]
    fn inflected_forms_reach_the_same_entry() {
        assert_eq!(polarity(&stem("amazing")), Some(2));
        assert_eq!(polarity(&stem("amazed")), Some(2));
        assert_eq!(polarity(&stem("recommends")), Some(1));
        assert_eq!(polarity(&stem("disappointing")), Some(-1));
        assert_eq!(polarity(&stem("disappointed")), Some(-1));
    }

    #[test]
    fn unknown_tokens_have_no_polarity() {
        assert_eq!(polarity(&stem("parking")), None);
        assert_eq!(polarity(&stem("latte")), None);
    }
}
