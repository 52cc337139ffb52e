//! Geographic rating factors by state
//!
//! Each state carries a relative cost index, a statutory tobacco surcharge
//! cap, and a monthly base rate for the rating year. Unknown state codes
//! resolve to defined national-average values rather than erroring, since
//! upstream intake owns state-code validation.

use std::collections::HashMap;

/// Rating factors for a single state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateFactors {
    /// Relative medical cost index (1.0 = national average)
    pub cost_index: f64,

    /// Maximum permitted tobacco surcharge, 0.0-0.50.
    /// States that prohibit tobacco rating carry 0.0.
    pub tobacco_surcharge_cap: f64,

    /// Monthly base rate in dollars for the rating year
    pub base_rate: f64,
}

/// National-average factors used for unknown state codes
pub const NATIONAL_AVERAGE: StateFactors = StateFactors {
    cost_index: 1.00,
    tobacco_surcharge_cap: 0.50,
    base_rate: 450.0,
};

/// Per-state geographic rating index
#[derive(Debug, Clone)]
pub struct GeographicIndex {
    entries: HashMap<String, StateFactors>,
    national: StateFactors,
}

impl GeographicIndex {
    /// Create from loaded CSV tables
    pub fn from_loaded(loaded: &super::loader::LoadedRatingTables) -> Self {
        Self {
            entries: loaded.states.clone(),
            national: NATIONAL_AVERAGE,
        }
    }

    /// Create with custom entries
    pub fn new(entries: HashMap<String, StateFactors>, national: StateFactors) -> Self {
        Self { entries, national }
    }

    /// Relative cost index for a state (national average when unknown)
    pub fn cost_index(&self, state: &str) -> f64 {
        self.factors(state).cost_index
    }

    /// Statutory tobacco surcharge cap for a state, 0.0-0.50
    pub fn tobacco_surcharge_cap(&self, state: &str) -> f64 {
        self.factors(state).tobacco_surcharge_cap
    }

    /// Monthly base rate in dollars for a state
    pub fn base_rate(&self, state: &str) -> f64 {
        self.factors(state).base_rate
    }

    /// Whether the state code is in the table
    pub fn is_known(&self, state: &str) -> bool {
        self.entries.contains_key(&state.to_ascii_uppercase())
    }

    fn factors(&self, state: &str) -> StateFactors {
        let code = state.to_ascii_uppercase();
        match self.entries.get(&code) {
            Some(f) => *f,
            None => {
                log::warn!("unknown state code {:?}, using national-average factors", state);
                self.national
            }
        }
    }

    /// Embedded state table for the current rating year.
    ///
    /// Surcharge caps: 0.50 federal default; 0.0 where tobacco rating is
    /// prohibited (CA, MA, NJ, NY, RI, VT, DC); reduced statutory caps in
    /// AR (0.20), CO (0.15), and KY (0.40).
    fn default_entries() -> HashMap<String, StateFactors> {
        const TABLE: &[(&str, f64, f64, f64)] = &[
            // (state, cost_index, tobacco_cap, base_rate)
            ("AL", 0.92, 0.50, 414.0),
            ("AK", 1.35, 0.50, 604.0),
            ("AZ", 0.95, 0.50, 428.0),
            ("AR", 0.90, 0.20, 405.0),
            ("CA", 1.12, 0.00, 504.0),
            ("CO", 0.98, 0.15, 441.0),
            ("CT", 1.15, 0.50, 517.0),
            ("DE", 1.05, 0.50, 472.0),
            ("DC", 1.06, 0.00, 477.0),
            ("FL", 1.04, 0.50, 468.0),
            ("GA", 0.96, 0.50, 432.0),
            ("HI", 0.94, 0.50, 423.0),
            ("ID", 0.93, 0.50, 419.0),
            ("IL", 1.02, 0.50, 459.0),
            ("IN", 0.95, 0.50, 428.0),
            ("IA", 0.91, 0.50, 410.0),
            ("KS", 0.93, 0.50, 419.0),
            ("KY", 0.94, 0.40, 423.0),
            ("LA", 0.99, 0.50, 446.0),
            ("ME", 1.08, 0.50, 486.0),
            ("MD", 1.03, 0.50, 464.0),
            ("MA", 1.18, 0.00, 531.0),
            ("MI", 0.97, 0.50, 437.0),
            ("MN", 0.99, 0.50, 446.0),
            ("MS", 0.92, 0.50, 414.0),
            ("MO", 0.94, 0.50, 423.0),
            ("MT", 0.98, 0.50, 441.0),
            ("NE", 0.95, 0.50, 428.0),
            ("NV", 1.00, 0.50, 450.0),
            ("NH", 1.07, 0.50, 482.0),
            ("NJ", 1.14, 0.00, 513.0),
            ("NM", 0.93, 0.50, 419.0),
            ("NY", 1.20, 0.00, 540.0),
            ("NC", 0.98, 0.50, 441.0),
            ("ND", 0.96, 0.50, 432.0),
            ("OH", 0.96, 0.50, 432.0),
            ("OK", 0.92, 0.50, 414.0),
            ("OR", 1.01, 0.50, 455.0),
            ("PA", 1.00, 0.50, 450.0),
            ("RI", 1.09, 0.00, 491.0),
            ("SC", 0.95, 0.50, 428.0),
            ("SD", 0.97, 0.50, 437.0),
            ("TN", 0.93, 0.50, 419.0),
            ("TX", 0.99, 0.50, 446.0),
            ("UT", 0.90, 0.50, 405.0),
            ("VT", 1.16, 0.00, 522.0),
            ("VA", 0.99, 0.50, 446.0),
            ("WA", 1.03, 0.50, 464.0),
            ("WV", 1.10, 0.50, 495.0),
            ("WI", 0.98, 0.50, 441.0),
            ("WY", 1.22, 0.50, 549.0),
        ];

        TABLE
            .iter()
            .map(|&(code, cost_index, tobacco_surcharge_cap, base_rate)| {
                (
                    code.to_string(),
                    StateFactors {
                        cost_index,
                        tobacco_surcharge_cap,
                        base_rate,
                    },
                )
            })
            .collect()
    }
}

impl Default for GeographicIndex {
    fn default() -> Self {
        Self {
            entries: Self::default_entries(),
            national: NATIONAL_AVERAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_state_lookup() {
        let geo = GeographicIndex::default();

        assert_eq!(geo.cost_index("FL"), 1.04);
        assert_eq!(geo.base_rate("FL"), 468.0);
        assert_eq!(geo.tobacco_surcharge_cap("FL"), 0.50);
        assert!(geo.is_known("FL"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let geo = GeographicIndex::default();

        assert_eq!(geo.cost_index("fl"), geo.cost_index("FL"));
        assert_eq!(geo.base_rate("ny"), geo.base_rate("NY"));
    }

    #[test]
    fn test_unknown_state_falls_back_to_national() {
        let geo = GeographicIndex::default();

        assert_eq!(geo.cost_index("ZZ"), NATIONAL_AVERAGE.cost_index);
        assert_eq!(geo.base_rate("ZZ"), NATIONAL_AVERAGE.base_rate);
        assert_eq!(geo.tobacco_surcharge_cap(""), NATIONAL_AVERAGE.tobacco_surcharge_cap);
        assert!(!geo.is_known("ZZ"));
    }

    #[test]
    fn test_prohibiting_states_have_zero_cap() {
        let geo = GeographicIndex::default();

        for state in ["CA", "MA", "NJ", "NY", "RI", "VT", "DC"] {
            assert_eq!(geo.tobacco_surcharge_cap(state), 0.0, "state {}", state);
        }
    }

    #[test]
    fn test_caps_within_federal_bound() {
        let geo = GeographicIndex::default();

        for (code, factors) in &geo.entries {
            assert!(
                (0.0..=0.50).contains(&factors.tobacco_surcharge_cap),
                "cap out of range for {}",
                code
            );
        }
    }

    #[test]
    fn test_full_state_coverage() {
        let geo = GeographicIndex::default();

        // 50 states plus DC
        assert_eq!(geo.entries.len(), 51);
    }
}
