use std::fmt;

use serde::{Deserialize, Serialize};

/// Score above which a transcript reads as bullish.
pub const BULLISH_THRESHOLD: f64 = 0.15;
/// Score below which a transcript reads as bearish.
pub const BEARISH_THRESHOLD: f64 = -0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    /// Classify a compound score against the fixed ±0.15 thresholds.
    pub fn from_score(score: f64) -> Self {
        if score > BULLISH_THRESHOLD {
            SentimentLabel::Bullish
        } else if score < BEARISH_THRESHOLD {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Bullish => write!(f, "Bullish"),
            SentimentLabel::Bearish => write!(f, "Bearish"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Financial keyword categories, in their fixed scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Revenue,
    Profit,
    Margin,
    Growth,
    Decline,
    Guidance,
    Cost,
    Debt,
    Cash,
    Dividend,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 10] = [
        KeywordCategory::Revenue,
        KeywordCategory::Profit,
        KeywordCategory::Margin,
        KeywordCategory::Growth,
        KeywordCategory::Decline,
        KeywordCategory::Guidance,
        KeywordCategory::Cost,
        KeywordCategory::Debt,
        KeywordCategory::Cash,
        KeywordCategory::Dividend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Revenue => "revenue",
            KeywordCategory::Profit => "profit",
            KeywordCategory::Margin => "margin",
            KeywordCategory::Growth => "growth",
            KeywordCategory::Decline => "decline",
            KeywordCategory::Guidance => "guidance",
            KeywordCategory::Cost => "cost",
            KeywordCategory::Debt => "debt",
            KeywordCategory::Cash => "cash",
            KeywordCategory::Dividend => "dividend",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of financial figure found in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Currency,
    Percentage,
    Amount,
}

/// Logical part of an earnings call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptSection {
    Opening,
    Financials,
    Guidance,
    Qa,
}

impl TranscriptSection {
    pub const ALL: [TranscriptSection; 4] = [
        TranscriptSection::Opening,
        TranscriptSection::Financials,
        TranscriptSection::Guidance,
        TranscriptSection::Qa,
    ];
}

impl fmt::Display for TranscriptSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptSection::Opening => write!(f, "opening"),
            TranscriptSection::Financials => write!(f, "financials"),
            TranscriptSection::Guidance => write!(f, "guidance"),
            TranscriptSection::Qa => write!(f, "qa"),
        }
    }
}
