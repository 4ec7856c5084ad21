use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{KeywordCategory, NumberKind, SentimentLabel};

// ── Sentiment ────────────────────────────────────────────────

/// A finance phrase and how often it occurs in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub phrase: String,
    pub count: usize,
}

/// Full sentiment read of one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub overall_score: f64,
    pub overall_label: SentimentLabel,
    pub confidence: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub key_phrases: Vec<KeyPhrase>,
    pub positive_signals: Vec<String>,
    pub risk_factors: Vec<String>,
}

/// Lexicon-only polarity of a piece of text, without phrase or signal mining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalScore {
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Hit count per keyword category. Every category is always present.
pub type KeywordCounts = BTreeMap<KeywordCategory, usize>;

// ── Figures ──────────────────────────────────────────────────

/// A dollar amount, percentage or scaled amount quoted in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberMention {
    pub value: String,
    pub kind: NumberKind,
    /// Up to 50 characters either side of the match.
    pub context: String,
    /// Byte offset of the match in the searched text.
    pub position: usize,
}
