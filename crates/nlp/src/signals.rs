//! Sentence-level signal mining.
//!
//! Each sentence is checked against an ordered table of patterns; the first
//! pattern that matches decides its tag. Only sentences longer than
//! [`MIN_SENTENCE_CHARS`] are considered.

use std::fmt;
use std::sync::LazyLock;

use earnings_core::utils::truncate_chars;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::lexicon::{has_negative_hit, has_positive_hit};

/// Sentences at or below this trimmed length are ignored.
pub const MIN_SENTENCE_CHARS: usize = 20;
/// Reported sentences are cut to this many characters.
pub const MAX_SIGNAL_CHARS: usize = 120;
/// Maximum signals or risks returned.
pub const MAX_SIGNALS: usize = 5;
/// Maximum sentences accepted by the lexicon fallback.
const MAX_FALLBACK: usize = 4;

static SENTENCE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalKind {
    RecordResult,
    EstimateBeat,
    ExpectationsExceeded,
    GrowthRate,
    PercentIncrease,
    GuidanceRaise,
    DemandMomentum,
    MarginExpansion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskKind {
    Headwind,
    SupplyConstraint,
    EstimateMiss,
    GuidanceCut,
    PercentDecline,
    MarginCompression,
    Macro,
    Competition,
    Restructuring,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for RiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn table<K: Copy>(entries: &[(&str, K)]) -> Vec<(Regex, K)> {
    entries
        .iter()
        .map(|(pattern, kind)| (Regex::new(pattern).expect("signal pattern compiles"), *kind))
        .collect()
}

// Priority order: earlier entries win.
static SIGNAL_PATTERNS: LazyLock<Vec<(Regex, SignalKind)>> = LazyLock::new(|| {
    table(&[
        (
            r"(?i)\brecord (high|revenues?|profits?|quarter|results|year|sales)",
            SignalKind::RecordResult,
        ),
        (
            r"(?i)\bbeat (estimates|expectations|consensus|guidance)",
            SignalKind::EstimateBeat,
        ),
        (
            r"(?i)\bexceed(ed|s|ing)? ((our|analyst|consensus) )*(estimates|expectations|guidance|targets?)",
            SignalKind::ExpectationsExceeded,
        ),
        (r"(?i)\bgrew (by )?\d+(\.\d+)?%", SignalKind::GrowthRate),
        (
            r"(?i)\b(up|rose|increased) (by )?\d+(\.\d+)?%",
            SignalKind::PercentIncrease,
        ),
        (
            r"(?i)\b(raised|raising|raise|increased|increasing) ((our|the|full[- ]year|annual|fiscal) )*(guidance|outlook|forecast)",
            SignalKind::GuidanceRaise,
        ),
        (
            r"(?i)\b(strong|robust|accelerating|solid) (demand|growth|momentum|execution)",
            SignalKind::DemandMomentum,
        ),
        (
            r"(?i)\b(margin expansion|expanded margins?|margins? (improved|expanded|increased))",
            SignalKind::MarginExpansion,
        ),
    ])
});

static RISK_PATTERNS: LazyLock<Vec<(Regex, RiskKind)>> = LazyLock::new(|| {
    table(&[
        (r"(?i)headwind|challenge|pressure|uncertainty", RiskKind::Headwind),
        (r"(?i)supply chain|constraint", RiskKind::SupplyConstraint),
        (
            r"(?i)\bmissed? ((our|analyst|consensus) )*(estimates|expectations|consensus|guidance)",
            RiskKind::EstimateMiss,
        ),
        (
            r"(?i)\b(lowered|lowering|lower|cut|cutting|reduced|reducing) ((our|the|full[- ]year|annual|fiscal) )*(guidance|outlook|forecast)",
            RiskKind::GuidanceCut,
        ),
        (
            r"(?i)\b(declined|decreased|fell|dropped|down) (by )?\d+(\.\d+)?%",
            RiskKind::PercentDecline,
        ),
        (
            r"(?i)\b(margin compression|compressed margins?|margins? (declined|contracted|compressed|decreased))",
            RiskKind::MarginCompression,
        ),
        (
            r"(?i)\b(recession|slowdown|downturn|macro(economic)? (weakness|environment))",
            RiskKind::Macro,
        ),
        (
            r"(?i)\b(competition|competitors?|market share loss|lost (market )?share)",
            RiskKind::Competition,
        ),
        (
            r"(?i)\b(layoffs?|restructuring|impairments?|write-?downs?|write-?offs?)",
            RiskKind::Restructuring,
        ),
    ])
});

/// Split on runs of `.`, `!`, `?` and keep trimmed sentences over
/// [`MIN_SENTENCE_CHARS`] characters.
pub fn candidate_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

fn first_match<K: Copy>(patterns: &[(Regex, K)], sentence: &str) -> Option<K> {
    patterns
        .iter()
        .find(|(re, _)| re.is_match(sentence))
        .map(|(_, kind)| *kind)
}

/// Tag of the highest-priority positive pattern matching `sentence`.
pub fn classify_signal(sentence: &str) -> Option<SignalKind> {
    first_match(&SIGNAL_PATTERNS, sentence)
}

/// Tag of the highest-priority risk pattern matching `sentence`.
pub fn classify_risk(sentence: &str) -> Option<RiskKind> {
    first_match(&RISK_PATTERNS, sentence)
}

fn push_unique(found: &mut Vec<String>, sentence: &str) {
    let entry = truncate_chars(sentence, MAX_SIGNAL_CHARS);
    if !found.contains(&entry) {
        found.push(entry);
    }
}

fn mine<K, C, F>(text: &str, classify: C, fallback: F) -> Vec<String>
where
    K: fmt::Display,
    C: Fn(&str) -> Option<K>,
    F: Fn(&str) -> bool,
{
    let sentences = candidate_sentences(text);
    let mut found = Vec::new();

    for &sentence in &sentences {
        if found.len() >= MAX_SIGNALS {
            break;
        }
        if let Some(kind) = classify(sentence) {
            debug!(%kind, "sentence matched");
            push_unique(&mut found, sentence);
        }
    }

    if found.is_empty() {
        for &sentence in &sentences {
            if found.len() >= MAX_FALLBACK {
                break;
            }
            if fallback(sentence.to_lowercase().as_str()) {
                push_unique(&mut found, sentence);
            }
        }
    }

    found.truncate(MAX_SIGNALS);
    found
}

/// Sentences that make strong positive claims, at most [`MAX_SIGNALS`].
pub fn positive_signals(text: &str) -> Vec<String> {
    mine(text, classify_signal, |lower| {
        has_positive_hit(lower) && !has_negative_hit(lower)
    })
}

/// Sentences that flag risks or weakness, at most [`MAX_SIGNALS`].
pub fn risk_factors(text: &str) -> Vec<String> {
    mine(text, classify_risk, |lower| {
        has_negative_hit(lower) && !has_positive_hit(lower)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_sentences_filters_short() {
        let s = candidate_sentences("Too short. This sentence is long enough to keep!!! Ok?");
        assert_eq!(s, vec!["This sentence is long enough to keep"]);
    }

    #[test]
    fn test_exactly_twenty_chars_dropped() {
        // 20 characters exactly
        assert!(candidate_sentences("abcdefghij abcdefghi.").is_empty());
        assert_eq!(candidate_sentences("abcdefghij abcdefghij.").len(), 1);
    }

    #[test]
    fn test_classify_priority() {
        // Both "record revenue" and "grew 12%" match; record is checked first
        assert_eq!(
            classify_signal("We posted record revenue and sales grew 12%"),
            Some(SignalKind::RecordResult)
        );
        assert_eq!(
            classify_signal("Cloud sales grew 12.5% year over year"),
            Some(SignalKind::GrowthRate)
        );
        assert_eq!(
            classify_signal("We are raising our full-year guidance"),
            Some(SignalKind::GuidanceRaise)
        );
        assert_eq!(classify_signal("Nothing notable happened here"), None);
    }

    #[test]
    fn test_classify_risk() {
        assert_eq!(
            classify_risk("Currency headwinds weighed on results"),
            Some(RiskKind::Headwind)
        );
        assert_eq!(
            classify_risk("We missed expectations in Europe"),
            Some(RiskKind::EstimateMiss)
        );
        assert_eq!(
            classify_risk("Hardware sales declined 8% this quarter"),
            Some(RiskKind::PercentDecline)
        );
        assert_eq!(
            classify_risk("We announced a restructuring of the unit"),
            Some(RiskKind::Restructuring)
        );
    }

    #[test]
    fn test_positive_signal_dedup() {
        let text = "We beat estimates significantly this quarter. \
                    We beat estimates significantly this quarter. \
                    We beat estimates significantly this quarter.";
        assert_eq!(
            positive_signals(text),
            vec!["We beat estimates significantly this quarter".to_string()]
        );
    }

    #[test]
    fn test_signals_truncated_to_limit() {
        let text = (1..=8)
            .map(|i| format!("Segment {i} revenue grew {i}0% versus last year."))
            .collect::<Vec<_>>()
            .join(" ");
        let signals = positive_signals(&text);
        assert_eq!(signals.len(), MAX_SIGNALS);
        assert!(signals[0].starts_with("Segment 1"));
    }

    #[test]
    fn test_long_sentence_truncated() {
        let text = format!("Record revenue {}.", "x".repeat(300));
        let signals = positive_signals(&text);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].chars().count(), MAX_SIGNAL_CHARS);
    }

    #[test]
    fn test_positive_fallback() {
        // No pattern matches, but lexicon hits without negatives qualify
        let text = "Customers remain optimistic about the platform. \
                    Our teams stayed confident through the launch. \
                    There is some concern and optimism about pricing.";
        let signals = positive_signals(text);
        assert_eq!(
            signals,
            vec![
                "Customers remain optimistic about the platform".to_string(),
                "Our teams stayed confident through the launch".to_string(),
            ]
        );
    }

    #[test]
    fn test_fallback_capped_at_four() {
        let text = (1..=6)
            .map(|i| format!("Product line {i} saw healthy adoption overall."))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(positive_signals(&text).len(), 4);
    }

    #[test]
    fn test_risk_fallback_excludes_mixed() {
        let text = "The volatile pricing environment persists. \
                    Volatile but strong demand in the channel.";
        assert_eq!(
            risk_factors(text),
            vec!["The volatile pricing environment persists".to_string()]
        );
    }

    #[test]
    fn test_no_signals_on_empty() {
        assert!(positive_signals("").is_empty());
        assert!(risk_factors("   ").is_empty());
    }
}
