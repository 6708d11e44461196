//! Score table: the read-only elasticity dataset and its CSV loader.
//!
//! The table is built once per session and never mutated afterwards.
//! Every other module borrows it; nothing holds it as ambient state.
//!
//! Expected CSV columns (extra columns are ignored):
//!   meta_categ_name, item_price_bucket, Linear_Regression, Time_Series,
//!   Random_Forest, Weekly_Avg_BI, ASP

use crate::{
    error::{ElasticityError, ElasticityResult},
    types::{Category, ElasticityModel, PriceTranche},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "meta_categ_name",
    "item_price_bucket",
    "Linear_Regression",
    "Time_Series",
    "Random_Forest",
    "Weekly_Avg_BI",
    "ASP",
];

/// One (category, tranche) entry with its baseline metrics and the three
/// upstream elasticity estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub category:                 Category,
    pub tranche:                  PriceTranche,
    pub baseline_weekly_volume:   f64,
    pub average_selling_price:    f64,
    pub elasticity_linear:        f64,
    pub elasticity_time_series:   f64,
    pub elasticity_random_forest: f64,
}

impl ScoreRow {
    pub fn elasticity(&self, model: ElasticityModel) -> f64 {
        match model {
            ElasticityModel::Linear       => self.elasticity_linear,
            ElasticityModel::TimeSeries   => self.elasticity_time_series,
            ElasticityModel::RandomForest => self.elasticity_random_forest,
        }
    }

    pub fn tranche_rank(&self) -> usize {
        self.tranche.rank()
    }
}

/// Raw CSV record, before tranche normalization and validation.
#[derive(Debug, Deserialize)]
struct ScoreRecord {
    #[serde(rename = "meta_categ_name")]
    category: String,
    #[serde(rename = "item_price_bucket")]
    tranche: String,
    #[serde(rename = "Linear_Regression")]
    linear: f64,
    #[serde(rename = "Time_Series")]
    time_series: f64,
    #[serde(rename = "Random_Forest")]
    random_forest: f64,
    #[serde(rename = "Weekly_Avg_BI")]
    weekly_volume: f64,
    #[serde(rename = "ASP")]
    asp: f64,
}

#[derive(Debug, Clone)]
pub struct ScoreTable {
    rows:  Vec<ScoreRow>,
    index: HashMap<Category, HashMap<PriceTranche, usize>>,
}

impl ScoreTable {
    /// Build a table from rows already in memory.
    /// Rejects duplicate (category, tranche) keys so lookup stays unambiguous.
    pub fn new(rows: Vec<ScoreRow>) -> ElasticityResult<Self> {
        Self::from_rows("in-memory", rows)
    }

    fn from_rows(source_name: &str, rows: Vec<ScoreRow>) -> ElasticityResult<Self> {
        let mut index: HashMap<Category, HashMap<PriceTranche, usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            validate_row(source_name, row)?;
            let by_tranche = index.entry(row.category.clone()).or_default();
            if by_tranche.insert(row.tranche, i).is_some() {
                return Err(ElasticityError::data_unavailable(
                    source_name,
                    format!(
                        "duplicate row for category '{}' tranche '{}'",
                        row.category, row.tranche
                    ),
                ));
            }
        }
        Ok(Self { rows, index })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn lookup(&self, category: &str, tranche: PriceTranche) -> Option<&ScoreRow> {
        self.index
            .get(category)
            .and_then(|by_tranche| by_tranche.get(&tranche))
            .map(|&i| &self.rows[i])
    }

    /// Distinct categories, sorted alphabetically.
    pub fn categories(&self) -> Vec<Category> {
        self.rows
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tranches present in the table, in tranche order.
    pub fn tranches(&self) -> Vec<PriceTranche> {
        self.rows
            .iter()
            .map(|r| r.tranche)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// All rows for one category, sorted by tranche rank.
    pub fn rows_for_category(&self, category: &str) -> Vec<&ScoreRow> {
        let mut rows: Vec<&ScoreRow> = self
            .index
            .get(category)
            .map(|by_tranche| by_tranche.values().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default();
        rows.sort_by_key(|r| r.tranche_rank());
        rows
    }
}

fn validate_row(source_name: &str, row: &ScoreRow) -> ElasticityResult<()> {
    let fail = |reason: String| Err(ElasticityError::data_unavailable(source_name, reason));

    if row.category.trim().is_empty() {
        return fail("empty category label".into());
    }
    if !row.baseline_weekly_volume.is_finite() || row.baseline_weekly_volume < 0.0 {
        return fail(format!(
            "baseline weekly volume {} for '{}' must be non-negative",
            row.baseline_weekly_volume, row.category
        ));
    }
    if !row.average_selling_price.is_finite() || row.average_selling_price <= 0.0 {
        return fail(format!(
            "ASP {} for '{}' must be positive",
            row.average_selling_price, row.category
        ));
    }
    for model in ElasticityModel::ALL {
        if !row.elasticity(model).is_finite() {
            return fail(format!(
                "{} elasticity for '{}' {} is not a finite number",
                model, row.category, row.tranche
            ));
        }
    }
    Ok(())
}

/// Load the score table from a CSV reader.
pub fn load_scores<R: Read>(reader: R) -> ElasticityResult<ScoreTable> {
    load_scores_named("reader", reader)
}

/// Load the score table from a CSV file path.
pub fn load_scores_file(path: impl AsRef<Path>) -> ElasticityResult<ScoreTable> {
    let path = path.as_ref();
    let source_name = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| {
        ElasticityError::data_unavailable(&source_name, format!("cannot open: {e}"))
    })?;
    load_scores_named(&source_name, file)
}

fn load_scores_named<R: Read>(source_name: &str, reader: R) -> ElasticityResult<ScoreTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ElasticityError::data_unavailable(source_name, format!("unreadable header: {e}")))?
        .clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(ElasticityError::data_unavailable(
            source_name,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize::<ScoreRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = line_num + 2;
        let record = result.map_err(|e| {
            ElasticityError::data_unavailable(source_name, format!("line {line}: {e}"))
        })?;
        let tranche = PriceTranche::parse_label(&record.tranche).ok_or_else(|| {
            ElasticityError::data_unavailable(
                source_name,
                format!("line {line}: unknown price tranche '{}'", record.tranche),
            )
        })?;
        rows.push(ScoreRow {
            category:                 record.category,
            tranche,
            baseline_weekly_volume:   record.weekly_volume,
            average_selling_price:    record.asp,
            elasticity_linear:        record.linear,
            elasticity_time_series:   record.time_series,
            elasticity_random_forest: record.random_forest,
        });
    }

    let table = ScoreTable::from_rows(source_name, rows)?;
    log::info!(
        "scores: loaded {} rows across {} categories from {source_name}",
        table.len(),
        table.categories().len()
    );
    Ok(table)
}
