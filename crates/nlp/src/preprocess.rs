//! Transcript clean-up, segmentation and figure extraction.

use std::sync::LazyLock;

use earnings_core::models::NumberMention;
use earnings_core::types::{NumberKind, TranscriptSection};
use earnings_core::utils::{ceil_char_boundary, floor_char_boundary};
use regex::Regex;

/// Bytes of surrounding text kept on each side of a number mention.
const CONTEXT_BYTES: usize = 50;
/// Sentences at or below this trimmed length are dropped by [`extract_sentences`].
const MIN_SENTENCE_CHARS: usize = 10;

const QA_MARKERS: [&str; 4] = ["question-and-answer", "q&a", "questions and answers", "operator:"];
const GUIDANCE_MARKERS: [&str; 4] = ["outlook", "guidance", "looking ahead", "expectations"];

static SPEAKER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[A-Z][a-z]+ [A-Z][a-z]+:").unwrap());
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}(:\d{2})?").unwrap());
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,;:!?'"$%()\-]"#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

static NUMBER_PATTERNS: LazyLock<[(Regex, NumberKind); 3]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"(?i)\$\d[\d,]*(\.\d+)?(\s*(million|billion|m|b)\b)?").unwrap(),
            NumberKind::Currency,
        ),
        (Regex::new(r"\d[\d,]*(\.\d+)?%").unwrap(), NumberKind::Percentage),
        (
            Regex::new(r"(?i)\d[\d,]*(\.\d+)?\s*(million|billion|m|b)\b").unwrap(),
            NumberKind::Amount,
        ),
    ]
});

/// Normalize a raw transcript.
///
/// Speaker labels at line starts are removed before whitespace is collapsed,
/// so every `Firstname Lastname:` prefix goes, not just the first one.
pub fn clean_transcript(text: &str) -> String {
    let text = SPEAKER_LABEL.replace_all(text, "");
    let text = TIMESTAMP.replace_all(&text, "");
    let text = DISALLOWED.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// The four logical parts of a call. Any part may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptSections<'a> {
    pub opening: &'a str,
    pub financials: &'a str,
    pub guidance: &'a str,
    pub qa: &'a str,
}

impl<'a> TranscriptSections<'a> {
    /// Sections paired with their names, in call order.
    pub fn iter(&self) -> impl Iterator<Item = (TranscriptSection, &'a str)> {
        [
            (TranscriptSection::Opening, self.opening),
            (TranscriptSection::Financials, self.financials),
            (TranscriptSection::Guidance, self.guidance),
            (TranscriptSection::Qa, self.qa),
        ]
        .into_iter()
    }
}

fn earliest(haystack: &str, markers: &[&str]) -> Option<usize> {
    markers.iter().filter_map(|m| haystack.find(m)).min()
}

/// Split a transcript into opening, financials, guidance and Q&A.
///
/// Q&A starts at the earliest Q&A marker. Guidance starts at the earliest
/// guidance marker in the second half of what precedes Q&A. The rest is cut
/// at one third into opening and financials.
pub fn segment_transcript(text: &str) -> TranscriptSections<'_> {
    // ASCII lowering keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();

    let qa_start = earliest(&lower, &QA_MARKERS).unwrap_or(text.len());
    let (body, qa) = text.split_at(qa_start);

    let mid = ceil_char_boundary(body, body.len() / 2);
    let guidance_start = earliest(&lower[mid..qa_start], &GUIDANCE_MARKERS)
        .map(|pos| mid + pos)
        .unwrap_or(body.len());
    let (rest, guidance) = body.split_at(guidance_start);

    let third = floor_char_boundary(rest, rest.len() / 3);
    let (opening, financials) = rest.split_at(third);

    TranscriptSections {
        opening,
        financials,
        guidance,
        qa,
    }
}

/// Trimmed sentences longer than ten characters.
pub fn extract_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Currency, percentage and scaled-amount mentions with surrounding context.
///
/// Results are grouped by kind (currency, percentage, amount) and ordered by
/// position within each group. A figure such as `$4.1 billion` appears both as
/// a currency and as an amount.
pub fn extract_numbers(text: &str) -> Vec<NumberMention> {
    let mut mentions = Vec::new();
    for (re, kind) in NUMBER_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let start = floor_char_boundary(text, m.start().saturating_sub(CONTEXT_BYTES));
            let end = ceil_char_boundary(text, m.end() + CONTEXT_BYTES);
            mentions.push(NumberMention {
                value: m.as_str().to_string(),
                kind: *kind,
                context: text[start..end].trim().to_string(),
                position: m.start(),
            });
        }
    }
    mentions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_transcript() {
        let raw = "John Smith: Good morning.\n\nJane Doe:   Revenue rose 5% ★ at 10:30:15 today.";
        assert_eq!(
            clean_transcript(raw),
            "Good morning. Revenue rose 5% at today."
        );
    }

    #[test]
    fn test_clean_keeps_finance_punctuation() {
        let raw = "EPS of $1.20 (vs. $1.05), up 14%; \"solid\" - isn't it?";
        assert_eq!(clean_transcript(raw), raw);
    }

    #[test]
    fn test_segment_without_markers() {
        let text = "aaaaaabbbbbbbbbbbb";
        let s = segment_transcript(text);
        assert_eq!(s.opening, "aaaaaa");
        assert_eq!(s.financials, "bbbbbbbbbbbb");
        assert_eq!(s.guidance, "");
        assert_eq!(s.qa, "");
    }

    #[test]
    fn test_segment_with_markers() {
        let text = "Welcome to the call. Revenue was up nicely this year. \
                    Our outlook remains firm. Operator: first question please.";
        let s = segment_transcript(text);
        assert!(s.qa.starts_with("Operator:"));
        assert!(s.guidance.starts_with("outlook"));
        assert_eq!(
            [s.opening, s.financials, s.guidance, s.qa].concat(),
            text
        );
    }

    #[test]
    fn test_guidance_marker_in_first_half_ignored() {
        let text = "Guidance first. Then a long stretch of ordinary financial discussion here.";
        let s = segment_transcript(text);
        assert_eq!(s.guidance, "");
    }

    #[test]
    fn test_segment_handles_multibyte() {
        let s = segment_transcript("€€€ €€€ €€€");
        assert_eq!([s.opening, s.financials].concat(), "€€€ €€€ €€€");
    }

    #[test]
    fn test_extract_sentences() {
        let s = extract_sentences("Short one. This sentence is kept! Tiny? Another kept sentence.");
        assert_eq!(s, vec!["This sentence is kept", "Another kept sentence"]);
    }

    #[test]
    fn test_extract_numbers() {
        let text = "Revenue was $52.3 billion, up 15% year-over-year on 1,200 million units.";
        let found = extract_numbers(text);
        let summary: Vec<_> = found.iter().map(|n| (n.kind, n.value.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (NumberKind::Currency, "$52.3 billion"),
                (NumberKind::Percentage, "15%"),
                (NumberKind::Amount, "52.3 billion"),
                (NumberKind::Amount, "1,200 million"),
            ]
        );
        assert_eq!(found[0].position, 12);
        assert!(found[1].context.contains("year-over-year"));
    }

    #[test]
    fn test_number_context_is_bounded() {
        let text = format!("{}25%{}", "x".repeat(80), "y".repeat(80));
        let found = extract_numbers(&text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].context.len(), 50 + 3 + 50);
    }
}
