//! # Sentiment Engine
//!
//! Entry points that combine every pass into a [`SentimentResult`].
//! All functions are pure: the same text always yields the same result, and
//! no input (including `""`) makes them fail.

use earnings_core::models::{KeywordCounts, SentimentResult};
use tracing::debug;

use crate::phrases::{key_phrases, keyword_analysis};
use crate::scoring::score_text;
use crate::signals::{positive_signals, risk_factors};

/// Analyze a transcript: polarity, key phrases, positive signals and risks.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    let score = score_text(text);
    let key_phrases = key_phrases(text);
    let positive_signals = positive_signals(text);
    let risk_factors = risk_factors(text);

    debug!(
        chars = text.len(),
        phrases = key_phrases.len(),
        signals = positive_signals.len(),
        risks = risk_factors.len(),
        "sentiment analysis complete"
    );

    SentimentResult {
        overall_score: score.score,
        overall_label: score.label,
        confidence: score.confidence,
        positive: score.positive,
        negative: score.negative,
        neutral: score.neutral,
        key_phrases,
        positive_signals,
        risk_factors,
    }
}

/// Per-category keyword counts, independent of [`analyze_sentiment`].
pub fn get_keyword_analysis(text: &str) -> KeywordCounts {
    keyword_analysis(text)
}
