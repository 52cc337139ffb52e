//! Age rating curve with the federal 3:1 adult band
//!
//! The curve separates:
//! - Adult factors for ages 21-64 (strictly increasing, 1.000 at 21, 3.000 at 64)
//! - A flat child factor for ages 0-17
//! - Clamping rules for everything outside those bands
//!
//! Out-of-range ages never error: callers are expected to have validated ages
//! upstream, so the curve resolves them to a defined factor instead.

/// Flat rating factor for ages 0-17
pub const CHILD_FACTOR: f64 = 0.635;

/// First age rated on the adult curve
pub const ADULT_FLOOR_AGE: i32 = 21;

/// Last age rated on the adult curve; everything older takes the ceiling
pub const ADULT_CEILING_AGE: i32 = 64;

/// Age rating curve over embedded or loaded factor tables
#[derive(Debug, Clone)]
pub struct AgeCurve {
    /// Adult factors indexed by (age - 21), covering ages 21-64
    adult_factors: Vec<f64>,

    /// Flat factor applied to ages 0-17
    child_factor: f64,
}

impl AgeCurve {
    /// Create the default curve for the current rating year
    pub fn federal_default() -> Self {
        Self {
            adult_factors: Self::default_adult_factors(),
            child_factor: CHILD_FACTOR,
        }
    }

    /// Create from loaded CSV tables
    pub fn from_loaded(loaded: &super::loader::LoadedRatingTables) -> Self {
        Self {
            adult_factors: loaded.age_factors.clone(),
            child_factor: CHILD_FACTOR,
        }
    }

    /// Create with custom adult factors (index 0 = age 21)
    pub fn new(adult_factors: Vec<f64>, child_factor: f64) -> Self {
        Self {
            adult_factors,
            child_factor,
        }
    }

    /// Rating factor for a covered person's age
    ///
    /// - 21-64: table lookup, strictly increasing
    /// - 18-20: rated as age 21
    /// - 0-17: flat child factor
    /// - 65+ or beyond the table: the ceiling factor
    /// - negative/malformed: clamps to the child factor
    pub fn factor(&self, age: i32) -> f64 {
        if age > ADULT_CEILING_AGE {
            return self.ceiling();
        }
        if age >= ADULT_FLOOR_AGE {
            let idx = (age - ADULT_FLOOR_AGE) as usize;
            return self
                .adult_factors
                .get(idx)
                .copied()
                .unwrap_or_else(|| self.ceiling());
        }
        if age >= 18 {
            // 18-20 rate identically to 21
            return self.adult_factors.first().copied().unwrap_or(1.0);
        }
        // 0-17 and anything malformed below that
        self.child_factor
    }

    /// Ceiling factor (age 64 and older)
    pub fn ceiling(&self) -> f64 {
        self.adult_factors.last().copied().unwrap_or(3.0)
    }

    /// Flat child factor
    pub fn child_factor(&self) -> f64 {
        self.child_factor
    }

    /// Adult factor table (index 0 = age 21)
    pub fn adult_factors(&self) -> &[f64] {
        &self.adult_factors
    }

    /// Default adult factors for ages 21-64.
    ///
    /// The published CMS default curve is flat across ages 21-24; this table
    /// grades through that range instead so the curve is strictly increasing
    /// end to end while preserving the mandated 1.000/3.000 endpoints.
    pub fn default_adult_factors() -> Vec<f64> {
        vec![
            // Age 21-30
            1.000, 1.010, 1.021, 1.033, 1.048, 1.070, 1.096, 1.126, 1.159, 1.195,
            // Age 31-40
            1.233, 1.273, 1.315, 1.358, 1.403, 1.449, 1.497, 1.546, 1.596, 1.648,
            // Age 41-50
            1.702, 1.759, 1.818, 1.880, 1.945, 2.013, 2.083, 2.157, 2.234, 2.314,
            // Age 51-60
            2.397, 2.483, 2.572, 2.664, 2.759, 2.830, 2.880, 2.916, 2.942, 2.961,
            // Age 61-64
            2.975, 2.985, 2.993, 3.000,
        ]
    }
}

impl Default for AgeCurve {
    fn default() -> Self {
        Self::federal_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_band_endpoints() {
        let curve = AgeCurve::federal_default();

        assert_eq!(curve.factor(21), 1.000);
        assert_eq!(curve.factor(64), 3.000);
        assert_relative_eq!(curve.factor(64) / curve.factor(21), 3.0);
    }

    #[test]
    fn test_strictly_increasing_adult_band() {
        let curve = AgeCurve::federal_default();

        for age in 21..64 {
            assert!(
                curve.factor(age + 1) > curve.factor(age),
                "factor not strictly increasing at age {}: {} -> {}",
                age,
                curve.factor(age),
                curve.factor(age + 1)
            );
        }
    }

    #[test]
    fn test_child_band() {
        let curve = AgeCurve::federal_default();

        for age in 0..=17 {
            assert_eq!(curve.factor(age), CHILD_FACTOR);
        }
    }

    #[test]
    fn test_young_adults_rate_as_21() {
        let curve = AgeCurve::federal_default();

        assert_eq!(curve.factor(18), curve.factor(21));
        assert_eq!(curve.factor(19), curve.factor(21));
        assert_eq!(curve.factor(20), curve.factor(21));
    }

    #[test]
    fn test_ceiling_above_band() {
        let curve = AgeCurve::federal_default();

        assert_eq!(curve.factor(65), 3.000);
        assert_eq!(curve.factor(80), 3.000);
        assert_eq!(curve.factor(120), 3.000);
    }

    #[test]
    fn test_malformed_age_clamps_to_child_factor() {
        let curve = AgeCurve::federal_default();

        assert_eq!(curve.factor(-1), CHILD_FACTOR);
        assert_eq!(curve.factor(-40), CHILD_FACTOR);
    }

    #[test]
    fn test_custom_table_short_of_64_uses_last_as_ceiling() {
        // Table covering only 21-23
        let curve = AgeCurve::new(vec![1.0, 1.1, 1.2], CHILD_FACTOR);

        assert_eq!(curve.factor(23), 1.2);
        assert_eq!(curve.factor(24), 1.2);
        assert_eq!(curve.factor(70), 1.2);
    }
}
