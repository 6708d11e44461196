use crate::types::{ElasticityModel, PriceTranche};
use serde::{Deserialize, Serialize};

/// Requests a front end can send to a running dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardCommand {
    GetOptions,
    Curve {
        category: String,
    },
    Simulate {
        category:             String,
        tranche:              PriceTranche,
        #[serde(default)]
        model:                Option<ElasticityModel>,
        #[serde(default)]
        price_change_percent: Option<f64>,
    },
    FeeImpact,
    Quit,
}
