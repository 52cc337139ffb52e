//! Single-person premium calculation
//!
//! Premium = base rate x age factor x geographic cost index x tier
//! multiplier x tobacco multiplier. The tobacco multiplier is bounded by
//! the state's statutory cap and never applies to minors.

use serde::{Deserialize, Serialize};

use crate::household::MetalTier;
use crate::rating::RatingTables;

/// Premium calculator over a set of rating tables
#[derive(Debug, Clone)]
pub struct PremiumCalculator {
    tables: RatingTables,
}

impl PremiumCalculator {
    /// Create a calculator with the given rating tables
    pub fn new(tables: RatingTables) -> Self {
        Self { tables }
    }

    /// Reference to the underlying rating tables
    pub fn tables(&self) -> &RatingTables {
        &self.tables
    }

    /// Monthly premium for one covered person at an explicit base rate
    pub fn price(
        &self,
        base_rate: f64,
        age: i32,
        state: &str,
        tier: MetalTier,
        is_tobacco_user: bool,
    ) -> f64 {
        base_rate
            * self.tables.age_curve.factor(age)
            * self.tables.geography.cost_index(state)
            * tier.multiplier()
            * self.tobacco_multiplier(state, age, is_tobacco_user)
    }

    /// Monthly premium using the state's table base rate
    pub fn price_at_state_base(
        &self,
        age: i32,
        state: &str,
        tier: MetalTier,
        is_tobacco_user: bool,
    ) -> f64 {
        let base_rate = self.tables.geography.base_rate(state);
        self.price(base_rate, age, state, tier, is_tobacco_user)
    }

    /// Premiums for one covered person across the four ordered tiers
    pub fn price_across_tiers(
        &self,
        base_rate: f64,
        age: i32,
        state: &str,
        is_tobacco_user: bool,
    ) -> TierPremiums {
        TierPremiums {
            bronze: self.price(base_rate, age, state, MetalTier::Bronze, is_tobacco_user),
            silver: self.price(base_rate, age, state, MetalTier::Silver, is_tobacco_user),
            gold: self.price(base_rate, age, state, MetalTier::Gold, is_tobacco_user),
            platinum: self.price(base_rate, age, state, MetalTier::Platinum, is_tobacco_user),
        }
    }

    /// Tobacco multiplier for a covered person.
    /// Minors are never surcharged regardless of the flag.
    fn tobacco_multiplier(&self, state: &str, age: i32, is_tobacco_user: bool) -> f64 {
        if is_tobacco_user && age >= 18 {
            1.0 + self.tables.geography.tobacco_surcharge_cap(state)
        } else {
            1.0
        }
    }
}

impl Default for PremiumCalculator {
    fn default() -> Self {
        Self::new(RatingTables::default_rating())
    }
}

/// Monthly premiums for one covered person across the four ordered tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPremiums {
    pub bronze: f64,
    pub silver: f64,
    pub gold: f64,
    pub platinum: f64,
}

impl TierPremiums {
    /// The premium for a specific tier in the sweep
    pub fn for_tier(&self, tier: MetalTier) -> Option<f64> {
        match tier {
            MetalTier::Bronze => Some(self.bronze),
            MetalTier::Silver => Some(self.silver),
            MetalTier::Gold => Some(self.gold),
            MetalTier::Platinum => Some(self.platinum),
            MetalTier::Catastrophic => None,
        }
    }

    /// Tier/premium pairs in ascending tier order
    pub fn entries(&self) -> [(MetalTier, f64); 4] {
        [
            (MetalTier::Bronze, self.bronze),
            (MetalTier::Silver, self.silver),
            (MetalTier::Gold, self.gold),
            (MetalTier::Platinum, self.platinum),
        ]
    }

    /// Whether bronze < silver < gold < platinum holds
    pub fn is_ordered(&self) -> bool {
        self.bronze < self.silver && self.silver < self.gold && self.gold < self.platinum
    }
}
