//! Earnings arithmetic and human-readable earnings reports.
//!
//! Figures are supplied by the caller; nothing here fetches market data.

pub mod calculator;
pub mod report;

pub use calculator::{beat_miss, eps, growth, margins, pe_ratio, BeatMiss, IncomeStatement, Margins};
pub use report::{
    basic_summary, build_earnings_report, compute_metrics, format_currency, format_markdown,
    highlights, EarningsMetrics, EarningsReport, MetricsInput, TranscriptInsights,
};
