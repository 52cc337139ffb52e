//! Household, plan offer, and utilization data structures

mod data;

pub use data::{
    Household, Residence, HouseholdIncome, IncomeBand, BudgetPreference, UtilizationLevel,
    MetalTier, NetworkType, PlanOffer, Copays, UtilizationProfile, PrescriptionTier,
    RiskTolerance, CurrentCoverage,
};
