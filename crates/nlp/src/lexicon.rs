//! # Earnings Lexicon
//!
//! Fixed vocabularies used by every pass of the engine. Tables are plain
//! `const` data; the compiled matchers built from them live in `LazyLock`
//! statics so they are compiled once and shared read-only across threads.

use std::sync::LazyLock;

use earnings_core::types::KeywordCategory;
use regex::Regex;

/// Positive stems. Matched both as substrings of tokens and as whole words.
pub const POSITIVE_TERMS: [&str; 28] = [
    "strong",
    "growth",
    "beat",
    "momentum",
    "record",
    "exceeded",
    "outperform",
    "robust",
    "solid",
    "improved",
    "accelerating",
    "expanding",
    "confident",
    "optimistic",
    "healthy",
    "resilient",
    "innovation",
    "opportunity",
    "tailwind",
    "upside",
    "excellent",
    "outstanding",
    "gains",
    "raised",
    "favorable",
    "efficiency",
    "surpassed",
    "profitable",
];

/// Negative stems. Matched both as substrings of tokens and as whole words.
pub const NEGATIVE_TERMS: [&str; 28] = [
    "weak",
    "decline",
    "headwind",
    "recession",
    "challenging",
    "difficult",
    "disappointing",
    "miss",
    "pressure",
    "concern",
    "uncertainty",
    "risk",
    "slowdown",
    "cautious",
    "volatile",
    "inflationary",
    "competitive",
    "disruption",
    "downturn",
    "loss",
    "shortfall",
    "impairment",
    "layoffs",
    "restructuring",
    "softness",
    "lowered",
    "deteriorating",
    "constraint",
];

/// Trigger phrases per category, in scan order.
pub const KEYWORD_CATEGORIES: [(KeywordCategory, &[&str]); 10] = [
    (KeywordCategory::Revenue, &["revenue", "sales", "top line", "top-line"]),
    (
        KeywordCategory::Profit,
        &["profit", "earnings", "income", "bottom line", "bottom-line"],
    ),
    (
        KeywordCategory::Margin,
        &["margin", "gross margin", "operating margin", "net margin"],
    ),
    (
        KeywordCategory::Growth,
        &["growth", "increase", "grew", "expanded", "accelerate"],
    ),
    (
        KeywordCategory::Decline,
        &["decline", "decrease", "fell", "dropped", "contracted"],
    ),
    (
        KeywordCategory::Guidance,
        &["guidance", "outlook", "forecast", "expect", "anticipate"],
    ),
    (KeywordCategory::Cost, &["cost", "expense", "spending", "investment"]),
    (KeywordCategory::Debt, &["debt", "leverage", "borrowing", "credit"]),
    (
        KeywordCategory::Cash,
        &["cash", "liquidity", "cash flow", "free cash flow"],
    ),
    (
        KeywordCategory::Dividend,
        &["dividend", "buyback", "repurchase", "capital return"],
    ),
];

/// Multi-word finance phrases surfaced as key phrases, in scan order.
pub const BIGRAM_PATTERNS: [&str; 14] = [
    "revenue growth",
    "free cash flow",
    "gross margin",
    "operating margin",
    "operating income",
    "net income",
    "earnings per share",
    "cash flow",
    "share repurchase",
    "market share",
    "customer demand",
    "supply chain",
    "full year",
    "record revenue",
];

/// Case-insensitive whole-word matcher for a literal term.
pub(crate) fn word_regex(term: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).expect("lexicon term compiles")
}

/// Case-insensitive substring matcher for a literal phrase.
pub(crate) fn phrase_regex(phrase: &str) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(phrase))).expect("lexicon phrase compiles")
}

pub(crate) static POSITIVE_WORDS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| POSITIVE_TERMS.iter().map(|t| word_regex(t)).collect());

pub(crate) static NEGATIVE_WORDS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| NEGATIVE_TERMS.iter().map(|t| word_regex(t)).collect());

pub(crate) static CATEGORY_MATCHERS: LazyLock<Vec<(KeywordCategory, Vec<(&'static str, Regex)>)>> =
    LazyLock::new(|| {
        KEYWORD_CATEGORIES
            .iter()
            .map(|(category, phrases)| {
                let matchers = phrases.iter().map(|p| (*p, word_regex(p))).collect();
                (*category, matchers)
            })
            .collect()
    });

pub(crate) static BIGRAM_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| BIGRAM_PATTERNS.iter().map(|p| (*p, phrase_regex(p))).collect());

/// True if lower-cased text contains any positive stem.
pub fn has_positive_hit(lower: &str) -> bool {
    POSITIVE_TERMS.iter().any(|t| lower.contains(t))
}

/// True if lower-cased text contains any negative stem.
pub fn has_negative_hit(lower: &str) -> bool {
    NEGATIVE_TERMS.iter().any(|t| lower.contains(t))
}
