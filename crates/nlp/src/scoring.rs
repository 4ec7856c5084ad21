//! Lexical polarity scoring.
//!
//! Two passes feed the same counters:
//! 1. every whitespace token that *contains* a stem counts once per polarity
//! 2. every whole-word occurrence of a stem counts again
//!
//! A plain whole word therefore counts twice while an inflected form
//! ("strongly", "headwinds") counts once. The ±0.15 label thresholds are tuned
//! against this weighting, so it must stay as is.

use earnings_core::models::LexicalScore;
use earnings_core::types::SentimentLabel;
use earnings_core::utils::round2;
use tracing::debug;

use crate::lexicon::{NEGATIVE_TERMS, NEGATIVE_WORDS, POSITIVE_TERMS, POSITIVE_WORDS};

/// Confidence never exceeds this value.
pub const MAX_CONFIDENCE: f64 = 0.9;
/// Number of keyword hits that maps to a confidence of 1.0 before capping.
const CONFIDENCE_SATURATION_HITS: f64 = 20.0;

/// Pass 1: substring hits per lower-cased whitespace token.
pub fn token_hits(text: &str) -> (usize, usize) {
    let lower = text.to_lowercase();
    let mut pos = 0;
    let mut neg = 0;
    for token in lower.split_whitespace() {
        if POSITIVE_TERMS.iter().any(|t| token.contains(t)) {
            pos += 1;
        }
        if NEGATIVE_TERMS.iter().any(|t| token.contains(t)) {
            neg += 1;
        }
    }
    (pos, neg)
}

/// Pass 2: case-insensitive whole-word hits against the original text.
pub fn whole_word_hits(text: &str) -> (usize, usize) {
    let pos = POSITIVE_WORDS.iter().map(|re| re.find_iter(text).count()).sum();
    let neg = NEGATIVE_WORDS.iter().map(|re| re.find_iter(text).count()).sum();
    (pos, neg)
}

/// Score the polarity of `text`. Total over all inputs, including "".
pub fn score_text(text: &str) -> LexicalScore {
    let (token_pos, token_neg) = token_hits(text);
    let (word_pos, word_neg) = whole_word_hits(text);
    let pos_hits = token_pos + word_pos;
    let neg_hits = token_neg + word_neg;

    // Floor at 1 so an unmatched text scores 0 instead of dividing by zero
    let total = (pos_hits + neg_hits).max(1) as f64;
    let positive = pos_hits as f64 / total;
    let negative = neg_hits as f64 / total;
    let neutral = (1.0 - positive - negative).max(0.0);
    let compound = (pos_hits as f64 - neg_hits as f64) / total;
    let confidence = (total / CONFIDENCE_SATURATION_HITS).min(MAX_CONFIDENCE);

    // Label from the rounded score so the reported pair is always consistent
    let score = round2(compound);
    let label = SentimentLabel::from_score(score);

    debug!(
        token_pos,
        token_neg, word_pos, word_neg, score, %label, "lexical score"
    );

    LexicalScore {
        positive_hits: pos_hits,
        negative_hits: neg_hits,
        score,
        label,
        confidence,
        positive: round2(positive),
        negative: round2(negative),
        neutral: round2(neutral),
    }
}
