//! Shared primitive types used across the dashboard.

use crate::error::ElasticityError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A product category label, as it appears in `meta_categ_name`.
pub type Category = String;

/// Fixed annualization factor. No calendar awareness, no compounding.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// A discrete item-price band. Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceTranche {
    UpTo3,
    From3To10,
    From10To20,
    From20To50,
    Over50,
}

impl PriceTranche {
    pub const ALL: [PriceTranche; 5] = [
        PriceTranche::UpTo3,
        PriceTranche::From3To10,
        PriceTranche::From10To20,
        PriceTranche::From20To50,
        PriceTranche::Over50,
    ];

    /// Canonical label, matching the `item_price_bucket` column.
    pub fn label(self) -> &'static str {
        match self {
            PriceTranche::UpTo3      => "<= £3",
            PriceTranche::From3To10  => "£3-£10",
            PriceTranche::From10To20 => "£10-£20",
            PriceTranche::From20To50 => "£20-£50",
            PriceTranche::Over50     => "£50+",
        }
    }

    /// Sortable position in the fixed tranche order.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Parse a tranche label, tolerating surrounding and inner whitespace,
    /// `≤` for `<=`, en/em dashes for `-`, and a missing currency sign.
    pub fn parse_label(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '£')
            .map(|c| match c {
                '–' | '—' => '-',
                other => other,
            })
            .collect();
        let key = key.replace('≤', "<=");

        match key.as_str() {
            "<=3"   => Some(PriceTranche::UpTo3),
            "3-10"  => Some(PriceTranche::From3To10),
            "10-20" => Some(PriceTranche::From10To20),
            "20-50" => Some(PriceTranche::From20To50),
            "50+"   => Some(PriceTranche::Over50),
            _ => None,
        }
    }
}

impl fmt::Display for PriceTranche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceTranche {
    type Err = ElasticityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceTranche::parse_label(s)
            .ok_or_else(|| ElasticityError::InvalidInput(format!("unknown price tranche '{s}'")))
    }
}

impl Serialize for PriceTranche {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PriceTranche {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PriceTranche::parse_label(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown price tranche '{raw}'"))
        })
    }
}

/// Which upstream model's elasticity estimate to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElasticityModel {
    #[serde(alias = "Linear_Regression", alias = "linear_regression")]
    Linear,
    #[serde(alias = "Time_Series")]
    TimeSeries,
    #[serde(alias = "Random_Forest")]
    RandomForest,
}

impl ElasticityModel {
    pub const ALL: [ElasticityModel; 3] = [
        ElasticityModel::Linear,
        ElasticityModel::TimeSeries,
        ElasticityModel::RandomForest,
    ];

    /// Column holding this model's estimate in the score file.
    pub fn column(self) -> &'static str {
        match self {
            ElasticityModel::Linear       => "Linear_Regression",
            ElasticityModel::TimeSeries   => "Time_Series",
            ElasticityModel::RandomForest => "Random_Forest",
        }
    }
}

impl fmt::Display for ElasticityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ElasticityModel {
    type Err = ElasticityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear_regression" | "lr" => Ok(ElasticityModel::Linear),
            "time_series" | "timeseries" | "ts"   => Ok(ElasticityModel::TimeSeries),
            "random_forest" | "randomforest" | "rf" => Ok(ElasticityModel::RandomForest),
            _ => Err(ElasticityError::InvalidInput(format!(
                "unknown elasticity model '{s}'"
            ))),
        }
    }
}
