use crate::types::PriceTranche;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElasticityError {
    #[error("Score data unavailable ({source_name}): {reason}")]
    DataUnavailable { source_name: String, reason: String },

    #[error("No data available for category '{category}'{}", tranche_suffix(.tranche))]
    NoDataForSelection {
        category: String,
        tranche: Option<PriceTranche>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ElasticityError {
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ElasticityError::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that must stop the session before any view renders.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ElasticityError::DataUnavailable { .. })
    }
}

fn tranche_suffix(tranche: &Option<PriceTranche>) -> String {
    match tranche {
        Some(t) => format!(" in tranche '{t}'"),
        None => String::new(),
    }
}

pub type ElasticityResult<T> = Result<T, ElasticityError>;
