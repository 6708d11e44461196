//! Elasticity curve by category: one series per model, points in tranche order.

use crate::{
    error::{ElasticityError, ElasticityResult},
    score_table::{ScoreRow, ScoreTable},
    types::{Category, ElasticityModel, PriceTranche},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub tranche:    PriceTranche,
    pub elasticity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    pub model:  ElasticityModel,
    pub points: Vec<CurvePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElasticityCurve {
    pub category: Category,
    pub rows:     Vec<ScoreRow>,
    pub series:   Vec<CurveSeries>,
}

impl ElasticityCurve {
    pub fn for_category(table: &ScoreTable, category: &str) -> ElasticityResult<Self> {
        if !table.contains_category(category) {
            return Err(ElasticityError::NoDataForSelection {
                category: category.to_string(),
                tranche:  None,
            });
        }

        let rows: Vec<ScoreRow> = table
            .rows_for_category(category)
            .into_iter()
            .cloned()
            .collect();

        let series = ElasticityModel::ALL
            .iter()
            .map(|&model| CurveSeries {
                model,
                points: rows
                    .iter()
                    .map(|r| CurvePoint { tranche: r.tranche, elasticity: r.elasticity(model) })
                    .collect(),
            })
            .collect();

        Ok(Self { category: category.to_string(), rows, series })
    }

    pub fn series_for(&self, model: ElasticityModel) -> Option<&CurveSeries> {
        self.series.iter().find(|s| s.model == model)
    }

    /// Plain-text table of the category's scores, one tranche per line.
    pub fn render_table(&self) -> String {
        let mut out = format!(
            "{:<10} {:>18} {:>12} {:>14}\n",
            "tranche", "Linear_Regression", "Time_Series", "Random_Forest"
        );
        for row in &self.rows {
            out.push_str(&format!(
                "{:<10} {:>18.3} {:>12.3} {:>14.3}\n",
                row.tranche.label(),
                row.elasticity_linear,
                row.elasticity_time_series,
                row.elasticity_random_forest
            ));
        }
        out
    }
}
