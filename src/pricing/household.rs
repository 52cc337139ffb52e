//! Household premium aggregation
//!
//! Sums per-person premiums across a household. Only the first
//! `RATED_CHILD_CAP` children on the record are rated; later entries
//! contribute zero additional premium, in the order supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::household::{Household, MetalTier};
use super::premium::PremiumCalculator;

/// Maximum number of children rated per household.
/// The selection is the first N in caller order, not the N oldest.
pub const RATED_CHILD_CAP: usize = 3;

/// Breakdown of a household premium calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseholdPremium {
    /// Total monthly premium
    pub total: f64,

    /// Adult portion of the total
    pub adult_total: f64,

    /// Child portion of the total
    pub child_total: f64,

    /// Number of children actually rated (capped)
    pub rated_children: usize,
}

/// Monthly premium for a full household at an explicit base rate.
///
/// Tobacco flags align to adults by index; a missing or short flag list
/// defaults the remainder to non-users.
pub fn household_premium(
    calc: &PremiumCalculator,
    base_rate: f64,
    adult_ages: &[u8],
    child_ages: &[u8],
    state: &str,
    tier: MetalTier,
    tobacco_flags: Option<&[bool]>,
) -> HouseholdPremium {
    let mut adult_total = 0.0;
    for (i, &age) in adult_ages.iter().enumerate() {
        let tobacco = tobacco_flags
            .and_then(|flags| flags.get(i).copied())
            .unwrap_or(false);
        adult_total += calc.price(base_rate, age as i32, state, tier, tobacco);
    }

    let rated_children = child_ages.len().min(RATED_CHILD_CAP);
    let mut child_total = 0.0;
    for &age in child_ages.iter().take(RATED_CHILD_CAP) {
        child_total += calc.price(base_rate, age as i32, state, tier, false);
    }

    HouseholdPremium {
        total: adult_total + child_total,
        adult_total,
        child_total,
        rated_children,
    }
}

impl PremiumCalculator {
    /// Monthly premium for a household at its primary state's base rate
    pub fn price_household(&self, household: &Household, tier: MetalTier) -> HouseholdPremium {
        let state = household.primary_state().unwrap_or("");
        let base_rate = self.tables().geography.base_rate(state);

        household_premium(
            self,
            base_rate,
            &household.adult_ages,
            &household.child_ages,
            state,
            tier,
            Some(&household.tobacco_use),
        )
    }
}
