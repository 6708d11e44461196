//! Buyer fee impact: how a flat-plus-percentage buyer fee inflates the
//! final price at different item prices. Low-priced items take the
//! largest relative hit, which is why their tranches run more elastic.

use crate::error::{ElasticityError, ElasticityResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuyerFeeSchedule {
    pub flat_fee:        f64,
    /// Fraction of item price, e.g. 0.04 for 4%.
    pub percentage_rate: f64,
}

impl Default for BuyerFeeSchedule {
    fn default() -> Self {
        Self { flat_fee: 0.72, percentage_rate: 0.04 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeImpact {
    pub item_price:       f64,
    pub fee:              f64,
    pub new_price:        f64,
    pub percent_increase: f64,
}

impl BuyerFeeSchedule {
    pub fn fee_for(&self, item_price: f64) -> f64 {
        self.flat_fee + item_price * self.percentage_rate
    }

    pub fn impact(&self, item_price: f64) -> ElasticityResult<FeeImpact> {
        if !item_price.is_finite() || item_price <= 0.0 {
            return Err(ElasticityError::InvalidInput(format!(
                "item price must be positive, got {item_price}"
            )));
        }
        let fee = self.fee_for(item_price);
        Ok(FeeImpact {
            item_price,
            fee,
            new_price: item_price + fee,
            percent_increase: fee / item_price * 100.0,
        })
    }

    pub fn impact_table(&self, prices: &[f64]) -> ElasticityResult<Vec<FeeImpact>> {
        prices.iter().map(|&p| self.impact(p)).collect()
    }
}

/// Render an impact table using the given currency symbol.
pub fn render_impact_table(impacts: &[FeeImpact], currency_symbol: &str) -> String {
    let mut out = format!(
        "{:>12} {:>12} {:>12} {:>12}\n",
        "Item Price", "Buyer Fee", "New Price", "% Increase"
    );
    for i in impacts {
        out.push_str(&format!(
            "{:>12} {:>12} {:>12} {:>12}\n",
            format!("{currency_symbol}{:.2}", i.item_price),
            format!("{currency_symbol}{:.2}", i.fee),
            format!("{currency_symbol}{:.2}", i.new_price),
            format!("+{:.1}%", i.percent_increase),
        ));
    }
    out
}
