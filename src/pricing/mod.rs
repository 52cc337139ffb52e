//! Premium calculation for single covered persons and full households

mod household;
mod premium;

pub use household::{household_premium, HouseholdPremium, RATED_CHILD_CAP};
pub use premium::{PremiumCalculator, TierPremiums};
