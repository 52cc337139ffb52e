//! CSV-based rating table loader
//!
//! Loads the age curve and state factor tables from CSV so yearly rate
//! updates ship as data. Parsing is split over `io::Read` so tables can be
//! loaded from files or from in-memory fixtures.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use super::geography::StateFactors;

/// Default path to the rating tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/rating";

/// Errors raised while loading rating tables
#[derive(Error, Debug)]
pub enum TableError {
    #[error("table file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid numeric field {field:?}: {value:?}")]
    BadField { field: &'static str, value: String },

    #[error("age factor table must cover ages 21-64, got {0} rows")]
    IncompleteAgeTable(usize),
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, TableError> {
    value.trim().parse().map_err(|_| TableError::BadField {
        field,
        value: value.to_string(),
    })
}

/// Parse adult age factors from CSV with `age,factor` rows covering 21-64
pub fn read_age_factors<R: Read>(reader: R) -> Result<Vec<f64>, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut factors = vec![0.0; 44];
    let mut seen = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let age_field = record.get(0).unwrap_or("");
        let age: usize = age_field.trim().parse().map_err(|_| TableError::BadField {
            field: "age",
            value: age_field.to_string(),
        })?;
        let factor = parse_f64("factor", record.get(1).unwrap_or(""))?;

        if (21..=64).contains(&age) {
            factors[age - 21] = factor;
            seen += 1;
        }
    }

    if seen < 44 {
        return Err(TableError::IncompleteAgeTable(seen));
    }

    Ok(factors)
}

/// Parse state factors from CSV with `state,cost_index,tobacco_cap,base_rate` rows
pub fn read_state_factors<R: Read>(reader: R) -> Result<HashMap<String, StateFactors>, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut states = HashMap::new();

    for result in csv_reader.records() {
        let record = result?;
        let code = record.get(0).unwrap_or("").trim().to_ascii_uppercase();
        if code.is_empty() {
            continue;
        }

        let cost_index = parse_f64("cost_index", record.get(1).unwrap_or(""))?;
        let tobacco_surcharge_cap = parse_f64("tobacco_cap", record.get(2).unwrap_or(""))?;
        let base_rate = parse_f64("base_rate", record.get(3).unwrap_or(""))?;

        states.insert(
            code,
            StateFactors {
                cost_index,
                // Federal bound regardless of what the file says
                tobacco_surcharge_cap: tobacco_surcharge_cap.clamp(0.0, 0.50),
                base_rate,
            },
        );
    }

    Ok(states)
}

/// Load adult age factors from `age_factors.csv` in the tables directory
pub fn load_age_factors(path: &Path) -> Result<Vec<f64>, TableError> {
    let file = File::open(path.join("age_factors.csv"))?;
    read_age_factors(file)
}

/// Load state factors from `state_factors.csv` in the tables directory
pub fn load_state_factors(path: &Path) -> Result<HashMap<String, StateFactors>, TableError> {
    let file = File::open(path.join("state_factors.csv"))?;
    read_state_factors(file)
}

/// All rating tables loaded from a directory
pub struct LoadedRatingTables {
    pub age_factors: Vec<f64>,
    pub states: HashMap<String, StateFactors>,
}

impl LoadedRatingTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, TableError> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, TableError> {
        Ok(Self {
            age_factors: load_age_factors(path)?,
            states: load_state_factors(path)?,
        })
    }
}
