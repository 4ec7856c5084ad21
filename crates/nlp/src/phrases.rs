//! Keyword-category counts and key-phrase ranking.

use earnings_core::models::{KeyPhrase, KeywordCounts};
use earnings_core::types::KeywordCategory;

use crate::lexicon::{BIGRAM_MATCHERS, CATEGORY_MATCHERS};

/// Maximum number of key phrases reported.
pub const MAX_KEY_PHRASES: usize = 10;

/// Whole-word hits per keyword category. All categories are present.
pub fn keyword_analysis(text: &str) -> KeywordCounts {
    let mut counts: KeywordCounts = KeywordCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for (category, matchers) in CATEGORY_MATCHERS.iter() {
        let hits: usize = matchers.iter().map(|(_, re)| re.find_iter(text).count()).sum();
        counts.insert(*category, hits);
    }
    counts
}

/// Most frequent finance phrases, count descending.
///
/// Category phrases are scanned first, then bigrams; a bigram that repeats a
/// category phrase updates that entry in place. Equal counts keep scan order.
pub fn key_phrases(text: &str) -> Vec<KeyPhrase> {
    let mut phrases: Vec<KeyPhrase> = Vec::new();

    let category_hits = CATEGORY_MATCHERS
        .iter()
        .flat_map(|(_, matchers)| matchers.iter());
    for (phrase, re) in category_hits.chain(BIGRAM_MATCHERS.iter()) {
        let count = re.find_iter(text).count();
        if count == 0 {
            continue;
        }
        match phrases.iter_mut().find(|p| p.phrase == *phrase) {
            Some(existing) => existing.count = count,
            None => phrases.push(KeyPhrase {
                phrase: phrase.to_string(),
                count,
            }),
        }
    }

    // sort_by is stable, so ties keep insertion order
    phrases.sort_by(|a, b| b.count.cmp(&a.count));
    phrases.truncate(MAX_KEY_PHRASES);
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_present() {
        let counts = keyword_analysis("");
        assert_eq!(counts.len(), 10);
        assert!(counts.values().all(|v| *v == 0));
    }

    #[test]
    fn test_margin_category() {
        let counts = keyword_analysis("Operating margin improved while gross margin held steady");
        // "margin" twice plus "operating margin" and "gross margin" once each
        assert_eq!(counts[&KeywordCategory::Margin], 4);
        assert_eq!(counts[&KeywordCategory::Revenue], 0);
        assert_eq!(counts.len(), 10);
    }

    #[test]
    fn test_category_counts_are_whole_word() {
        let counts = keyword_analysis("Revenues rose; revenue too. Costly costs, one cost.");
        assert_eq!(counts[&KeywordCategory::Revenue], 1);
        assert_eq!(counts[&KeywordCategory::Cost], 1);
    }

    #[test]
    fn test_phrase_ranking() {
        let text = "Revenue growth was solid. Revenue growth again. Revenue growth is key. \
                    Revenue growth continues. Revenue growth beat plan. \
                    We reiterate guidance and raise guidance.";
        let phrases = key_phrases(text);
        let pos = |name: &str| phrases.iter().position(|p| p.phrase == name).unwrap();
        assert!(pos("revenue growth") < pos("guidance"));
        let rg = &phrases[pos("revenue growth")];
        assert_eq!(rg.count, 5);
        assert_eq!(phrases[pos("guidance")].count, 2);
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let phrases = key_phrases("cash and debt");
        let names: Vec<_> = phrases.iter().map(|p| p.phrase.as_str()).collect();
        // debt category is declared before cash
        assert_eq!(names, vec!["debt", "cash"]);
    }

    #[test]
    fn test_bigram_merges_with_category_phrase() {
        let phrases = key_phrases("free cash flow improved; free cash flows too");
        let fcf: Vec<_> = phrases.iter().filter(|p| p.phrase == "free cash flow").collect();
        assert_eq!(fcf.len(), 1);
        // the substring bigram scan also sees "free cash flows"
        assert_eq!(fcf[0].count, 2);
    }

    #[test]
    fn test_truncated_to_ten() {
        let text = "revenue sales profit earnings income margin growth increase decline \
                    guidance outlook cost debt cash dividend buyback";
        assert_eq!(key_phrases(text).len(), MAX_KEY_PHRASES);
    }

    #[test]
    fn test_empty_text() {
        assert!(key_phrases("").is_empty());
    }
}
