//! Pure earnings arithmetic.
//!
//! Every function is total: a zero or missing denominator yields `0` or `None`
//! instead of an error, so callers can feed partially filled statements.

use earnings_core::utils::{round2, round_to};
use serde::{Deserialize, Serialize};

/// The income-statement lines needed for margin and EPS figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeStatement {
    pub revenue: f64,
    pub gross_profit: f64,
    pub operating_income: f64,
    pub net_income: f64,
}

/// Margins in percent, rounded to 2 dp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
}

/// Outcome of comparing a reported figure with its consensus estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatMiss {
    pub beat: Option<bool>,
    pub difference: Option<f64>,
    pub percent_diff: Option<f64>,
}

/// Gross, operating and net margin. All zero when revenue is zero.
pub fn margins(statement: &IncomeStatement) -> Margins {
    let revenue = statement.revenue;
    if revenue == 0.0 {
        return Margins::default();
    }
    let pct = |line: f64| round2(line / revenue * 100.0);
    Margins {
        gross_margin: pct(statement.gross_profit),
        operating_margin: pct(statement.operating_income),
        net_margin: pct(statement.net_income),
    }
}

/// Percent change from `previous` to `current`, measured against `|previous|`.
pub fn growth(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some(round2((current - previous) / previous.abs() * 100.0))
}

/// Earnings per share, 2 dp. Zero when there are no shares.
pub fn eps(net_income: f64, shares_outstanding: f64) -> f64 {
    if shares_outstanding == 0.0 {
        return 0.0;
    }
    round2(net_income / shares_outstanding)
}

pub fn pe_ratio(price: f64, eps: f64) -> Option<f64> {
    if eps == 0.0 {
        return None;
    }
    Some(round2(price / eps))
}

/// A result equal to the estimate counts as a miss.
pub fn beat_miss(actual: f64, estimate: Option<f64>) -> BeatMiss {
    match estimate {
        Some(estimate) if estimate != 0.0 => {
            let difference = actual - estimate;
            BeatMiss {
                beat: Some(difference > 0.0),
                difference: Some(round_to(difference, 4)),
                percent_diff: Some(round2(difference / estimate.abs() * 100.0)),
            }
        }
        _ => BeatMiss::default(),
    }
}
