//! Plan Advisor - Health plan pricing and recommendation engine
//!
//! This library provides:
//! - ACA-style premium rating (age curve, geographic factors, tobacco rules)
//! - Household premium aggregation with the 3-child rating cap
//! - Plan-to-plan comparison across weighted metrics and cost scenarios
//! - Scenario comparison over full household variants
//! - COBRA continuation and HSA tax-benefit analyzers
//! - A content-addressable calculation audit log

pub mod analyzers;
pub mod audit;
pub mod comparison;
pub mod household;
pub mod orchestrator;
pub mod pricing;
pub mod rating;
pub mod scenario;

// Re-export commonly used types
pub use audit::CalculationLog;
pub use comparison::PlanComparisonEngine;
pub use household::{Household, MetalTier, PlanOffer, UtilizationProfile};
pub use orchestrator::{Recommendation, RecommendationOrchestrator};
pub use pricing::PremiumCalculator;
pub use rating::RatingTables;
pub use scenario::ScenarioComparator;
