//! Presentation helpers: sign framing and number formatting.
//!
//! The simulation engine returns signed deltas unconditionally.
//! Everything about "gain" vs "loss" wording lives here.

use crate::simulation::SimulationResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTone {
    Gain,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaDescription {
    pub tone:      DeltaTone,
    pub magnitude: f64,
}

/// Non-negative values are gains; negative values are losses reported by magnitude.
pub fn describe_delta(value: f64) -> DeltaDescription {
    if value >= 0.0 {
        DeltaDescription { tone: DeltaTone::Gain, magnitude: value }
    } else {
        DeltaDescription { tone: DeltaTone::Loss, magnitude: value.abs() }
    }
}

/// `£1,234.50` style: two decimals, thousands separators, leading `-` when negative.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let sign = if value < 0.0 && rendered != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{}.{frac_part}", group_thousands(int_part))
}

/// Whole units with thousands separators.
pub fn format_volume(value: f64) -> String {
    let rendered = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && rendered != "0" { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rendered))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
    pub tone:  Option<DeltaTone>,
}

/// The four lines shown after a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub lines: Vec<ReportLine>,
}

impl SimulationReport {
    pub fn from_result(result: &SimulationResult, currency_symbol: &str) -> Self {
        let weekly = describe_delta(result.weekly_gmv_delta);
        let annual = describe_delta(result.annual_gmv_delta);

        // Annual impact follows the weekly framing; both share a sign.
        let weekly_label = match weekly.tone {
            DeltaTone::Gain => "Weekly GMV increase",
            DeltaTone::Loss => "Weekly GMV loss",
        };

        let lines = vec![
            ReportLine {
                label: "Baseline Weekly Orders".into(),
                value: format_volume(result.baseline_volume),
                tone:  None,
            },
            ReportLine {
                label: "Forecasted Weekly Orders".into(),
                value: format_volume(result.projected_volume),
                tone:  None,
            },
            ReportLine {
                label: weekly_label.into(),
                value: format_currency(weekly.magnitude, currency_symbol),
                tone:  Some(weekly.tone),
            },
            ReportLine {
                label: "Yearly GMV impact".into(),
                value: format_currency(annual.magnitude, currency_symbol),
                tone:  Some(weekly.tone),
            },
        ];

        Self { lines }
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}: {}", l.label, l.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
