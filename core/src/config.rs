use crate::{buyer_fee::BuyerFeeSchedule, types::ElasticityModel};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Score CSV, relative to the data directory unless absolute.
    #[serde(default = "default_scores_path")]
    pub scores_path: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_model")]
    pub default_model: ElasticityModel,
    #[serde(default = "default_price_change_percent")]
    pub default_price_change_percent: f64,
    #[serde(default)]
    pub buyer_fee: BuyerFeeSchedule,
    #[serde(default = "default_fee_reference_prices")]
    pub fee_reference_prices: Vec<f64>,

    #[serde(skip)]
    pub data_dir: PathBuf,
}

fn default_scores_path() -> String { "price_elasticity_scores.csv".into() }
fn default_currency_symbol() -> String { "£".into() }
fn default_model() -> ElasticityModel { ElasticityModel::Linear }
fn default_price_change_percent() -> f64 { -10.0 }
fn default_fee_reference_prices() -> Vec<f64> { vec![1.96, 6.50, 35.00, 75.00] }

impl DashboardConfig {
    /// Load from `<data_dir>/dashboard.json`.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let mut config: DashboardConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse {path}"))?;
        config.data_dir = PathBuf::from(data_dir);

        if config.fee_reference_prices.iter().any(|p| *p <= 0.0) {
            anyhow::bail!("{path}: fee_reference_prices must all be positive");
        }

        log::debug!(
            "config: loaded {path} (scores={}, model={}, change={:+.1}%)",
            config.scores_path,
            config.default_model,
            config.default_price_change_percent
        );
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            scores_path: default_scores_path(),
            currency_symbol: default_currency_symbol(),
            default_model: default_model(),
            default_price_change_percent: default_price_change_percent(),
            buyer_fee: BuyerFeeSchedule::default(),
            fee_reference_prices: default_fee_reference_prices(),
            data_dir: PathBuf::from("."),
        }
    }

    /// Resolved location of the score CSV.
    pub fn scores_file(&self) -> PathBuf {
        let p = PathBuf::from(&self.scores_path);
        if p.is_absolute() { p } else { self.data_dir.join(p) }
    }
}
