//! # Earnings NLP
//!
//! Lexicon-driven sentiment analysis of earnings-call transcripts.
//!
//! - [`analyze_sentiment`]: polarity, confidence, key phrases, positive
//!   signals and risk factors for one transcript
//! - [`get_keyword_analysis`]: per-category keyword counts
//! - [`build_report`]: cleaned transcript with sections, figures, guidance
//!   and a short extractive summary
//!
//! Every function is pure and synchronous. Callers on an async runtime should
//! run them on a blocking thread.

pub mod engine;
pub mod lexicon;
pub mod phrases;
pub mod preprocess;
pub mod report;
pub mod scoring;
pub mod signals;

pub use engine::{analyze_sentiment, get_keyword_analysis};
pub use phrases::{key_phrases, keyword_analysis};
pub use preprocess::{
    clean_transcript, extract_numbers, extract_sentences, segment_transcript, TranscriptSections,
};
pub use report::{build_report, ReportOptions, TranscriptReport};
pub use scoring::score_text;
