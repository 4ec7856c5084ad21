use chrono::NaiveDate;
use earnings_core::error::{EarningsError, Result};
use earnings_core::models::SentimentResult;
use serde::{Deserialize, Serialize};

use crate::calculator::{beat_miss, eps, growth, margins, pe_ratio, IncomeStatement};

/// Reported figures for one quarter, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsInput {
    pub ticker: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    pub current: IncomeStatement,
    /// Same quarter one year earlier, for YoY growth.
    #[serde(default)]
    pub year_ago: Option<IncomeStatement>,
    pub shares_outstanding: f64,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub eps_estimate: Option<f64>,
    #[serde(default)]
    pub revenue_estimate: Option<f64>,
}

impl MetricsInput {
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(EarningsError::ValidationError("ticker is required".into()));
        }
        let statements = std::iter::once(&self.current).chain(self.year_ago.as_ref());
        for s in statements {
            let lines = [s.revenue, s.gross_profit, s.operating_income, s.net_income];
            if lines.iter().any(|v| !v.is_finite()) {
                return Err(EarningsError::ValidationError(
                    "income statement values must be finite".into(),
                ));
            }
        }
        if !self.shares_outstanding.is_finite() || self.shares_outstanding < 0.0 {
            return Err(EarningsError::ValidationError(format!(
                "shares outstanding must be a non-negative number, got {}",
                self.shares_outstanding
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsMetrics {
    pub ticker: String,
    pub period: String,
    pub revenue: f64,
    pub net_income: f64,
    pub eps: f64,
    pub eps_estimate: Option<f64>,
    pub revenue_estimate: Option<f64>,
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
    pub yoy_revenue_growth: Option<f64>,
    pub yoy_eps_growth: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub beat_eps: Option<bool>,
    pub beat_revenue: Option<bool>,
    pub eps_surprise_pct: Option<f64>,
    pub revenue_surprise_pct: Option<f64>,
}

/// Everything known about one earnings release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    pub ticker: String,
    pub company_name: String,
    pub report_date: NaiveDate,
    pub metrics: EarningsMetrics,
    pub sentiment: Option<SentimentResult>,
    pub summary: String,
    pub key_highlights: Vec<String>,
    pub guidance: Vec<String>,
}

/// Transcript-derived parts of a report, when a transcript was analyzed.
#[derive(Debug, Clone, Default)]
pub struct TranscriptInsights {
    pub sentiment: Option<SentimentResult>,
    pub summary: String,
    pub guidance: Vec<String>,
}

pub fn compute_metrics(input: &MetricsInput) -> EarningsMetrics {
    let current = &input.current;
    let m = margins(current);
    let eps_now = eps(current.net_income, input.shares_outstanding);

    let (yoy_revenue_growth, yoy_eps_growth) = match &input.year_ago {
        Some(prev) => {
            let eps_prev = eps(prev.net_income, input.shares_outstanding);
            (growth(current.revenue, prev.revenue), growth(eps_now, eps_prev))
        }
        None => (None, None),
    };

    let eps_result = beat_miss(eps_now, input.eps_estimate);
    let revenue_result = beat_miss(current.revenue, input.revenue_estimate);

    EarningsMetrics {
        ticker: input.ticker.clone(),
        period: input.period.clone().unwrap_or_else(|| "Unknown".to_string()),
        revenue: current.revenue,
        net_income: current.net_income,
        eps: eps_now,
        eps_estimate: input.eps_estimate,
        revenue_estimate: input.revenue_estimate,
        gross_margin: m.gross_margin,
        operating_margin: m.operating_margin,
        net_margin: m.net_margin,
        yoy_revenue_growth,
        yoy_eps_growth,
        pe_ratio: input.price.and_then(|p| pe_ratio(p, eps_now)),
        beat_eps: eps_result.beat,
        beat_revenue: revenue_result.beat,
        eps_surprise_pct: eps_result.percent_diff,
        revenue_surprise_pct: revenue_result.percent_diff,
    }
}

/// Short bullet points on surprises, growth, profitability and tone.
pub fn highlights(metrics: &EarningsMetrics, sentiment: Option<&SentimentResult>) -> Vec<String> {
    let mut out = Vec::new();

    match metrics.beat_eps {
        Some(true) => out.push("EPS beat analyst estimates".to_string()),
        Some(false) => out.push("EPS missed analyst estimates".to_string()),
        None => {}
    }
    match metrics.beat_revenue {
        Some(true) => out.push("Revenue beat analyst estimates".to_string()),
        Some(false) => out.push("Revenue missed analyst estimates".to_string()),
        None => {}
    }

    if let Some(g) = metrics.yoy_revenue_growth {
        if g > 10.0 {
            out.push(format!("Strong revenue growth: {g:.1}% YoY"));
        } else if g < -5.0 {
            out.push(format!("Revenue decline: {g:.1}% YoY"));
        }
    }

    let nm = metrics.net_margin;
    if nm > 20.0 {
        out.push(format!("High profitability: {nm:.1}% net margin"));
    } else if nm > 0.0 && nm < 5.0 {
        out.push(format!("Thin margins: {nm:.1}% net margin"));
    }

    if let Some(s) = sentiment {
        out.push(format!("Management tone: {}", s.overall_label));
        if !s.positive_signals.is_empty() {
            let top: Vec<&str> = s.positive_signals.iter().take(3).map(String::as_str).collect();
            out.push(format!("Positive signals: {}", top.join(", ")));
        }
        if !s.risk_factors.is_empty() {
            let top: Vec<&str> = s.risk_factors.iter().take(3).map(String::as_str).collect();
            out.push(format!("Risk factors: {}", top.join(", ")));
        }
    }
    out
}

/// One-paragraph summary built from the figures alone.
pub fn basic_summary(metrics: &EarningsMetrics, company: &str) -> String {
    let mut parts = vec![format!("{company} reported quarterly earnings.")];

    if metrics.revenue != 0.0 {
        parts.push(format!("Revenue: {}", format_currency(metrics.revenue)));
        if let Some(g) = metrics.yoy_revenue_growth {
            let direction = if g > 0.0 { "up" } else { "down" };
            parts.push(format!("({direction} {:.1}% YoY)", g.abs()));
        }
    }
    if metrics.eps != 0.0 {
        parts.push(format!("EPS: ${:.2}", metrics.eps));
        if let Some(beat) = metrics.beat_eps {
            let verdict = if beat { "beat" } else { "missed" };
            parts.push(format!("({verdict} estimates)"));
        }
    }
    if metrics.net_margin != 0.0 {
        parts.push(format!("Net margin: {:.1}%", metrics.net_margin));
    }
    parts.join(" ")
}

/// Assemble a dated report. Without a transcript summary the figures-only
/// summary is used.
pub fn build_earnings_report(
    input: &MetricsInput,
    insights: TranscriptInsights,
    report_date: NaiveDate,
) -> Result<EarningsReport> {
    input.validate()?;
    let metrics = compute_metrics(input);
    let company_name = input
        .company_name
        .clone()
        .unwrap_or_else(|| input.ticker.clone());

    let key_highlights = highlights(&metrics, insights.sentiment.as_ref());
    let summary = if insights.summary.is_empty() {
        basic_summary(&metrics, &company_name)
    } else {
        insights.summary
    };

    Ok(EarningsReport {
        ticker: input.ticker.clone(),
        company_name,
        report_date,
        metrics,
        sentiment: insights.sentiment,
        summary,
        key_highlights,
        guidance: insights.guidance,
    })
}

/// `$1.23T`, `$4.56B`, `$7.89M`, or `$1,234.56` below a million.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{sign}${:.2}T", abs / 1e12)
    } else if abs >= 1e9 {
        format!("{sign}${:.2}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}${:.2}M", abs / 1e6)
    } else {
        format!("{sign}${}", group_thousands(&format!("{abs:.2}")))
    }
}

fn group_thousands(fixed: &str) -> String {
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed, ""));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if frac.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac}")
    }
}

fn opt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"))
}

fn verdict(beat: Option<bool>) -> &'static str {
    match beat {
        Some(true) => "Beat",
        Some(false) => "Miss",
        None => "N/A",
    }
}

pub fn format_markdown(report: &EarningsReport) -> String {
    let m = &report.metrics;
    let mut md = format!(
        "# Earnings Report: {} ({})\n**Report Date:** {}\n\n## Summary\n{}\n\n## Key Highlights\n",
        report.company_name,
        report.ticker,
        report.report_date.format("%Y-%m-%d"),
        report.summary,
    );
    for h in &report.key_highlights {
        md.push_str(&format!("- {h}\n"));
    }

    md.push_str(&format!(
        "
## Financial Metrics

| Metric | Value |
|--------|-------|
| Revenue | {} |
| Net Income | {} |
| EPS | ${:.2} |
| Gross Margin | {:.1}% |
| Operating Margin | {:.1}% |
| Net Margin | {:.1}% |
| YoY Revenue Growth | {} |
| YoY EPS Growth | {} |

## Beat/Miss Analysis
- **EPS:** {}
- **Revenue:** {}
",
        format_currency(m.revenue),
        format_currency(m.net_income),
        m.eps,
        m.gross_margin,
        m.operating_margin,
        m.net_margin,
        opt_pct(m.yoy_revenue_growth),
        opt_pct(m.yoy_eps_growth),
        verdict(m.beat_eps),
        verdict(m.beat_revenue),
    ));

    if let Some(s) = &report.sentiment {
        let or_none = |items: &[String]| {
            if items.is_empty() {
                "None identified".to_string()
            } else {
                items.join(", ")
            }
        };
        md.push_str(&format!(
            "
## Sentiment Analysis
- **Overall Tone:** {} (Score: {})
- **Confidence:** {:.0}%
- **Positive Signals:** {}
- **Risk Factors:** {}
",
            s.overall_label,
            s.overall_score,
            s.confidence * 100.0,
            or_none(&s.positive_signals),
            or_none(&s.risk_factors),
        ));
    }

    if !report.guidance.is_empty() {
        md.push_str("\n## Forward Guidance\n");
        for g in &report.guidance {
            md.push_str(&format!("- {g}\n"));
        }
    }
    md
}
