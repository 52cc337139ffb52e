//! HSA tax-benefit analysis
//!
//! Estimates the three-part tax savings (federal, FICA, state) of maxing an
//! HSA, projects balance growth over several horizons, and attaches a fixed
//! catalog of usage strategies. The growth return is a policy assumption
//! and overridable per analyzer instance.

use serde::{Deserialize, Serialize};

/// Individual contribution limit for the current tax year
pub const INDIVIDUAL_LIMIT: f64 = 4_300.0;

/// Family contribution limit for the current tax year
pub const FAMILY_LIMIT: f64 = 8_550.0;

/// Additional catch-up contribution at age 55+
pub const CATCH_UP_CONTRIBUTION: f64 = 1_000.0;

/// Catch-up eligibility age
pub const CATCH_UP_AGE: u8 = 55;

/// Combined employee FICA rate (Social Security + Medicare)
pub const FICA_RATE: f64 = 0.0765;

/// Default assumed real annual return for invested HSA balances
pub const DEFAULT_ANNUAL_RETURN: f64 = 0.07;

/// Retirement age used for the longest projection horizon
const RETIREMENT_AGE: u8 = 65;

/// Three-part annual tax savings estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSavings {
    pub federal: f64,
    pub fica: f64,
    pub state: f64,
    pub total: f64,
}

/// Projected balance at one horizon, assuming max contributions throughout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    /// Horizon label ("Year 1", "Retirement (age 65)", ...)
    pub label: String,

    /// Years of contributions in the horizon
    pub years: u32,

    /// Cumulative contributions over the horizon
    pub total_contributions: f64,

    /// Projected balance with compounding
    pub projected_value: f64,

    /// Investment growth component of the balance
    pub growth: f64,
}

/// One catalogued usage strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsaStrategy {
    pub name: String,
    pub description: String,
    pub best_for: String,
}

/// Result of an HSA benefit analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsaAnalysis {
    /// Applicable annual contribution limit, catch-up included
    pub contribution_limit: f64,

    /// Whether the family limit applied
    pub family_coverage: bool,

    /// Whether the catch-up addition applied
    pub catch_up_applied: bool,

    /// Annual tax savings at the maximum contribution
    pub tax_savings: TaxSavings,

    /// Balance projections at fixed horizons
    pub projections: Vec<GrowthProjection>,

    /// Qualitative recommendation
    pub recommendation: String,

    /// Fixed usage-strategy catalog
    pub strategies: Vec<HsaStrategy>,
}

/// HSA benefit analyzer
#[derive(Debug, Clone)]
pub struct HsaAnalyzer {
    /// Assumed real annual return on invested balances
    pub annual_return: f64,
}

impl Default for HsaAnalyzer {
    fn default() -> Self {
        Self {
            annual_return: DEFAULT_ANNUAL_RETURN,
        }
    }
}

impl HsaAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze the annual tax benefit and growth potential of maxing an HSA
    pub fn calculate_benefits(
        &self,
        family_size: u32,
        age: u8,
        annual_income: f64,
        state_tax_rate: f64,
    ) -> HsaAnalysis {
        let family_coverage = family_size >= 2;
        let base_limit = if family_coverage {
            FAMILY_LIMIT
        } else {
            INDIVIDUAL_LIMIT
        };
        let catch_up_applied = age >= CATCH_UP_AGE;
        let contribution_limit = if catch_up_applied {
            base_limit + CATCH_UP_CONTRIBUTION
        } else {
            base_limit
        };

        let federal_rate = federal_marginal_rate(annual_income);
        let tax_savings = TaxSavings {
            federal: contribution_limit * federal_rate,
            fica: contribution_limit * FICA_RATE,
            state: contribution_limit * state_tax_rate.max(0.0),
            total: contribution_limit * (federal_rate + FICA_RATE + state_tax_rate.max(0.0)),
        };

        let years_to_retirement = RETIREMENT_AGE.saturating_sub(age).max(1) as u32;
        let projections = vec![
            self.project("Year 1", 1, contribution_limit),
            self.project("Year 5", 5, contribution_limit),
            self.project("Year 10", 10, contribution_limit),
            self.project(
                &format!("Retirement (age {})", RETIREMENT_AGE),
                years_to_retirement,
                contribution_limit,
            ),
        ];

        let recommendation = self.recommendation(federal_rate, catch_up_applied, years_to_retirement);

        HsaAnalysis {
            contribution_limit,
            family_coverage,
            catch_up_applied,
            tax_savings,
            projections,
            recommendation,
            strategies: Self::strategies(),
        }
    }

    /// Future value of level annual contributions compounding at the
    /// assumed return: c * ((1+r)^n - 1) / r
    fn project(&self, label: &str, years: u32, annual_contribution: f64) -> GrowthProjection {
        let r = self.annual_return;
        let projected_value = if r == 0.0 {
            annual_contribution * years as f64
        } else {
            annual_contribution * (((1.0 + r).powi(years as i32) - 1.0) / r)
        };
        let total_contributions = annual_contribution * years as f64;

        GrowthProjection {
            label: label.to_string(),
            years,
            total_contributions,
            projected_value,
            growth: projected_value - total_contributions,
        }
    }

    fn recommendation(
        &self,
        federal_rate: f64,
        catch_up_applied: bool,
        years_to_retirement: u32,
    ) -> String {
        let mut rec = if federal_rate >= 0.24 {
            "Your marginal bracket makes the HSA the strongest tax shelter available \
             to you; contribute the maximum before any taxable investing."
                .to_string()
        } else {
            "Max the HSA if cash flow allows; the triple tax advantage beats a \
             taxable account even in a moderate bracket."
                .to_string()
        };

        if catch_up_applied {
            rec.push_str(" Include the catch-up contribution each year you are eligible.");
        }
        if years_to_retirement >= 20 {
            rec.push_str(" With a long horizon, invest the balance rather than holding cash.");
        }
        rec
    }

    /// The fixed usage-strategy catalog
    fn strategies() -> Vec<HsaStrategy> {
        vec![
            HsaStrategy {
                name: "Invest and let grow".to_string(),
                description: "Pay current medical costs out of pocket, invest the full \
                              balance, and reimburse yourself decades later."
                    .to_string(),
                best_for: "High earners who can cover routine care from cash flow".to_string(),
            },
            HsaStrategy {
                name: "Spend annually".to_string(),
                description: "Run qualified expenses through the account each year for \
                              the immediate tax discount."
                    .to_string(),
                best_for: "Tighter budgets with regular medical spending".to_string(),
            },
            HsaStrategy {
                name: "Hybrid reserve".to_string(),
                description: "Keep one deductible's worth in cash and invest the rest."
                    .to_string(),
                best_for: "Most families on HDHP coverage".to_string(),
            },
            HsaStrategy {
                name: "Retirement medical fund".to_string(),
                description: "Treat the HSA as a dedicated retirement account for \
                              Medicare premiums and late-life care."
                    .to_string(),
                best_for: "Savers 55+ already maxing other retirement accounts".to_string(),
            },
        ]
    }
}

/// Embedded federal marginal-rate brackets for the current tax year
/// (single-filer thresholds)
fn federal_marginal_rate(annual_income: f64) -> f64 {
    const BRACKETS: &[(f64, f64)] = &[
        (11_925.0, 0.10),
        (48_475.0, 0.12),
        (103_350.0, 0.22),
        (197_300.0, 0.24),
        (250_525.0, 0.32),
        (626_350.0, 0.35),
    ];

    for &(upper, rate) in BRACKETS {
        if annual_income <= upper {
            return rate;
        }
    }
    0.37
}
