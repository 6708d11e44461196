//! Price change simulation.
//!
//! Applies the point-elasticity definition to a single score row:
//!   demand change fraction = elasticity × (price change % / 100)
//!   projected volume       = baseline × (1 + demand change fraction)
//!   weekly GMV delta       = (projected − baseline) × ASP
//!   annual GMV delta       = weekly GMV delta × 52
//!
//! Projected volume is deliberately left unclamped: a large enough move can
//! take it below zero, and callers see that value as-is.

use crate::{
    error::{ElasticityError, ElasticityResult},
    score_table::{ScoreRow, ScoreTable},
    types::{Category, ElasticityModel, PriceTranche, WEEKS_PER_YEAR},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationQuery {
    pub category:             Category,
    pub tranche:              PriceTranche,
    pub model:                ElasticityModel,
    /// Signed: -10.0 is a 10% price cut.
    pub price_change_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub baseline_volume:        f64,
    pub projected_volume:       f64,
    pub weekly_gmv_delta:       f64,
    pub annual_gmv_delta:       f64,
    pub elasticity:             f64,
    pub demand_change_fraction: f64,
}

/// Parse a user-typed price change such as `-10`, `+5.5` or `10%`.
/// Anything else, including NaN and infinities, is `InvalidInput`.
pub fn parse_price_change(raw: &str) -> ElasticityResult<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let value: f64 = number.parse().map_err(|_| {
        ElasticityError::InvalidInput(format!("price change '{raw}' is not a number"))
    })?;
    check_price_change(value)
}

fn check_price_change(value: f64) -> ElasticityResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ElasticityError::InvalidInput(format!(
            "price change must be a finite percentage, got {value}"
        )))
    }
}

/// Look up the query's row and project volume and GMV.
///
/// Fails with `InvalidInput` for a non-finite price change and with
/// `NoDataForSelection` when the (category, tranche) pair is absent.
/// Every other step is total over finite inputs.
pub fn simulate(table: &ScoreTable, query: &SimulationQuery) -> ElasticityResult<SimulationResult> {
    check_price_change(query.price_change_percent)?;

    let row = table
        .lookup(&query.category, query.tranche)
        .ok_or_else(|| ElasticityError::NoDataForSelection {
            category: query.category.clone(),
            tranche:  Some(query.tranche),
        })?;

    Ok(project(row, query.model, query.price_change_percent))
}

/// The arithmetic half of `simulate`, for a row already in hand.
pub fn project(row: &ScoreRow, model: ElasticityModel, price_change_percent: f64) -> SimulationResult {
    let elasticity = row.elasticity(model);
    let baseline = row.baseline_weekly_volume;

    let demand_change_fraction = elasticity * (price_change_percent / 100.0);
    let projected_volume = baseline * (1.0 + demand_change_fraction);
    let weekly_gmv_delta = (projected_volume - baseline) * row.average_selling_price;
    let annual_gmv_delta = weekly_gmv_delta * WEEKS_PER_YEAR;

    log::debug!(
        "simulation: {} {} {model} change={price_change_percent:+.2}% e={elasticity:.3} \
         volume {baseline:.1} -> {projected_volume:.1}",
        row.category,
        row.tranche
    );

    SimulationResult {
        baseline_volume: baseline,
        projected_volume,
        weekly_gmv_delta,
        annual_gmv_delta,
        elasticity,
        demand_change_fraction,
    }
}
