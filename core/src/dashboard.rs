//! The dashboard session: config plus the immutable score table.
//!
//! RULES:
//!   - A session exists only once the score table has loaded. A failed load
//!     is fatal and no view is produced.
//!   - The table is never mutated. Every view is recomputed from it on demand.
//!   - A missing (category, tranche) selection is a warning, not a failure
//!     of the session.

use crate::{
    buyer_fee::FeeImpact,
    command::DashboardCommand,
    config::DashboardConfig,
    curve::ElasticityCurve,
    error::{ElasticityError, ElasticityResult},
    presentation::SimulationReport,
    score_table::{load_scores_file, ScoreTable},
    simulation::{simulate, SimulationQuery, SimulationResult},
    types::{Category, ElasticityModel, PriceTranche},
};
use serde::Serialize;

/// Values a front end offers in its selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOptions {
    pub categories: Vec<Category>,
    pub tranches:   Vec<PriceTranche>,
    pub models:     Vec<ElasticityModel>,
}

/// Response to a single `DashboardCommand`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardResponse {
    Options(DashboardOptions),
    Curve(ElasticityCurve),
    Simulation {
        query:  SimulationQuery,
        result: SimulationResult,
        report: SimulationReport,
    },
    FeeImpact {
        impacts: Vec<FeeImpact>,
    },
}

pub struct Dashboard {
    pub config: DashboardConfig,
    table:      ScoreTable,
}

impl Dashboard {
    pub fn from_parts(config: DashboardConfig, table: ScoreTable) -> Self {
        Self { config, table }
    }

    /// Load config and scores from `data_dir`.
    pub fn build(data_dir: &str) -> ElasticityResult<Self> {
        Self::build_with_scores(data_dir, None)
    }

    /// As `build`, optionally reading scores from an explicit path instead
    /// of the one named in the config.
    pub fn build_with_scores(data_dir: &str, scores_override: Option<&str>) -> ElasticityResult<Self> {
        let mut config = DashboardConfig::load(data_dir)
            .map_err(|e| ElasticityError::data_unavailable(data_dir, format!("{e:#}")))?;
        if let Some(path) = scores_override {
            config.scores_path = path.to_string();
        }

        let table = load_scores_file(config.scores_file())?;
        if table.is_empty() {
            return Err(ElasticityError::data_unavailable(
                config.scores_file().display().to_string(),
                "score table has no rows",
            ));
        }

        log::info!(
            "dashboard: ready with {} rows, {} categories, {} tranches",
            table.len(),
            table.categories().len(),
            table.tranches().len()
        );
        Ok(Self::from_parts(config, table))
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            categories: self.table.categories(),
            tranches:   self.table.tranches(),
            models:     ElasticityModel::ALL.to_vec(),
        }
    }

    pub fn curve(&self, category: &str) -> ElasticityResult<ElasticityCurve> {
        ElasticityCurve::for_category(&self.table, category)
    }

    /// Build a query, filling model and price change from config defaults.
    pub fn query(
        &self,
        category: &str,
        tranche: PriceTranche,
        model: Option<ElasticityModel>,
        price_change_percent: Option<f64>,
    ) -> SimulationQuery {
        SimulationQuery {
            category: category.to_string(),
            tranche,
            model: model.unwrap_or(self.config.default_model),
            price_change_percent: price_change_percent
                .unwrap_or(self.config.default_price_change_percent),
        }
    }

    pub fn simulate(&self, query: &SimulationQuery) -> ElasticityResult<SimulationResult> {
        simulate(&self.table, query).inspect_err(|e| {
            if let ElasticityError::NoDataForSelection { .. } = e {
                log::warn!("dashboard: {e}");
            }
        })
    }

    pub fn report(&self, result: &SimulationResult) -> SimulationReport {
        SimulationReport::from_result(result, &self.config.currency_symbol)
    }

    pub fn fee_impact(&self) -> ElasticityResult<Vec<FeeImpact>> {
        self.config
            .buyer_fee
            .impact_table(&self.config.fee_reference_prices)
    }

    /// Dispatch one command. `Quit` yields `Ok(None)`.
    pub fn handle(&self, command: DashboardCommand) -> ElasticityResult<Option<DashboardResponse>> {
        let response = match command {
            DashboardCommand::Quit => return Ok(None),
            DashboardCommand::GetOptions => DashboardResponse::Options(self.options()),
            DashboardCommand::Curve { category } => DashboardResponse::Curve(self.curve(&category)?),
            DashboardCommand::Simulate { category, tranche, model, price_change_percent } => {
                let query = self.query(&category, tranche, model, price_change_percent);
                let result = self.simulate(&query)?;
                let report = self.report(&result);
                DashboardResponse::Simulation { query, result, report }
            }
            DashboardCommand::FeeImpact => DashboardResponse::FeeImpact {
                impacts: self.fee_impact()?,
            },
        };
        Ok(Some(response))
    }
}
