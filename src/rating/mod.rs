//! Rating tables: age curve, geographic cost factors, and CSV loading

mod age_curve;
mod geography;
pub mod loader;

pub use age_curve::AgeCurve;
pub use geography::{GeographicIndex, StateFactors};
pub use loader::{LoadedRatingTables, TableError};

use std::path::Path;

/// Container for all rating tables used by the premium calculator
#[derive(Debug, Clone)]
pub struct RatingTables {
    pub age_curve: AgeCurve,
    pub geography: GeographicIndex,
}

impl RatingTables {
    /// Create tables with the embedded defaults for the current rating year
    pub fn default_rating() -> Self {
        Self {
            age_curve: AgeCurve::federal_default(),
            geography: GeographicIndex::default(),
        }
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let loaded = LoadedRatingTables::load_from(path)?;

        Ok(Self {
            age_curve: AgeCurve::from_loaded(&loaded),
            geography: GeographicIndex::from_loaded(&loaded),
        })
    }
}

impl Default for RatingTables {
    fn default() -> Self {
        Self::default_rating()
    }
}
