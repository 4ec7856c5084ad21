//! Full transcript report: sections, figures, guidance and summary on top of
//! the sentiment engine.

use std::collections::BTreeMap;

use earnings_core::models::{KeywordCounts, LexicalScore, NumberMention, SentimentResult};
use earnings_core::types::TranscriptSection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::analyze_sentiment;
use crate::phrases::keyword_analysis;
use crate::preprocess::{clean_transcript, extract_numbers, extract_sentences, segment_transcript};
use crate::scoring::score_text;

const GUIDANCE_KEYWORDS: [&str; 6] =
    ["expect", "guidance", "outlook", "forecast", "anticipate", "target"];
const SUMMARY_KEYWORDS: [&str; 6] =
    ["revenue", "earnings", "growth", "guidance", "outlook", "expect"];

/// Output limits for [`build_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub max_numbers: usize,
    pub max_guidance: usize,
    pub summary_sentences: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_numbers: 20,
            max_guidance: 10,
            summary_sentences: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptReport {
    pub word_count: usize,
    /// Words per section; every section is present.
    pub sections: BTreeMap<TranscriptSection, usize>,
    pub keyword_analysis: KeywordCounts,
    pub sentiment: SentimentResult,
    /// Lexical score of each non-empty section.
    pub section_sentiment: BTreeMap<TranscriptSection, LexicalScore>,
    pub numbers_mentioned: Vec<NumberMention>,
    pub guidance_statements: Vec<String>,
    pub summary: String,
}

fn mentions_any(sentence: &str, keywords: &[&str]) -> bool {
    let lower = sentence.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Forward-looking sentences, in transcript order.
pub fn guidance_statements(text: &str, limit: usize) -> Vec<String> {
    extract_sentences(text)
        .into_iter()
        .filter(|s| mentions_any(s, &GUIDANCE_KEYWORDS))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Join the first `limit` headline sentences into a short summary.
/// Returns an empty string when no sentence qualifies.
pub fn extractive_summary(text: &str, limit: usize) -> String {
    let picked: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty() && mentions_any(s, &SUMMARY_KEYWORDS))
        .take(limit)
        .collect();
    if picked.is_empty() {
        return String::new();
    }
    format!("{}.", picked.join(". "))
}

/// Clean `text` and run every analysis over it.
pub fn build_report(text: &str, options: &ReportOptions) -> TranscriptReport {
    let cleaned = clean_transcript(text);
    let parts = segment_transcript(&cleaned);

    let sections = parts
        .iter()
        .map(|(section, body)| (section, body.split_whitespace().count()))
        .collect();
    let section_sentiment = parts
        .iter()
        .filter(|(_, body)| !body.is_empty())
        .map(|(section, body)| (section, score_text(body)))
        .collect::<BTreeMap<_, _>>();

    let mut numbers_mentioned = extract_numbers(&cleaned);
    numbers_mentioned.truncate(options.max_numbers);

    let report = TranscriptReport {
        word_count: cleaned.split_whitespace().count(),
        sections,
        keyword_analysis: keyword_analysis(&cleaned),
        sentiment: analyze_sentiment(&cleaned),
        section_sentiment,
        numbers_mentioned,
        guidance_statements: guidance_statements(&cleaned, options.max_guidance),
        summary: extractive_summary(&cleaned, options.summary_sentences),
    };

    debug!(
        sections = report.section_sentiment.len(),
        numbers = report.numbers_mentioned.len(),
        guidance = report.guidance_statements.len(),
        "report sections built"
    );
    info!(
        words = report.word_count,
        label = %report.sentiment.overall_label,
        score = report.sentiment.overall_score,
        "transcript report ready"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::types::SentimentLabel;

    const CALL: &str = "Tim Cook: Good morning and welcome to the third quarter call. \
        Revenue was $52.3 billion, up 15% year-over-year, with strong demand. \
        Gross margin improved to 44.2% on record services revenue. \
        Looking ahead, we expect revenue growth of 8% to 10% next quarter. \
        Our guidance assumes a stable macro environment. \
        Operator: We will now take questions from analysts on the line.";

    #[test]
    fn test_report_shape() {
        let r = build_report(CALL, &ReportOptions::default());
        assert_eq!(r.sections.len(), 4);
        assert!(r.sections.values().all(|words| *words > 0));
        assert!(r.word_count > 50);
        assert_eq!(r.keyword_analysis.len(), 10);
        assert_eq!(r.sentiment.overall_label, SentimentLabel::Bullish);
        assert!(r.section_sentiment.contains_key(&TranscriptSection::Qa));
        assert!(r.section_sentiment.contains_key(&TranscriptSection::Guidance));
        assert!(!r.numbers_mentioned.is_empty());
    }

    #[test]
    fn test_speaker_label_removed_before_analysis() {
        let r = build_report(CALL, &ReportOptions::default());
        assert!(!r.summary.contains("Tim Cook"));
        assert!(r.numbers_mentioned.iter().all(|n| !n.context.contains("Tim Cook")));
    }

    #[test]
    fn test_guidance_statements() {
        let found = guidance_statements(CALL, 10);
        assert_eq!(
            found,
            vec![
                "Looking ahead, we expect revenue growth of 8% to 10% next quarter",
                "Our guidance assumes a stable macro environment",
            ]
        );
        assert_eq!(guidance_statements(CALL, 1).len(), 1);
    }

    #[test]
    fn test_extractive_summary() {
        let text = "Revenue rose. Costs were flat. Earnings improved. We expect more growth";
        assert_eq!(
            extractive_summary(text, 5),
            "Revenue rose. Earnings improved. We expect more growth."
        );
        assert_eq!(extractive_summary(text, 1), "Revenue rose.");
        assert_eq!(extractive_summary("Nothing to see here.", 5), "");
    }

    #[test]
    fn test_limits_respected() {
        let options = ReportOptions {
            max_numbers: 2,
            max_guidance: 0,
            summary_sentences: 1,
        };
        let r = build_report(CALL, &options);
        assert_eq!(r.numbers_mentioned.len(), 2);
        assert!(r.guidance_statements.is_empty());
        assert_eq!(r.summary.matches('.').count(), 1);
    }

    #[test]
    fn test_empty_transcript() {
        let r = build_report("", &ReportOptions::default());
        assert_eq!(r.word_count, 0);
        assert!(r.section_sentiment.is_empty());
        assert!(r.summary.is_empty());
        assert_eq!(r.sentiment.overall_label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(build_report(CALL, &ReportOptions::default())).unwrap();
        assert!(json["sections"]["qa"].is_u64());
        assert!(json["sectionSentiment"]["qa"]["score"].is_f64());
        assert!(json["numbersMentioned"][0]["kind"].is_string());
    }
}
