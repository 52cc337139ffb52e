//! Plan-to-plan comparison engine

mod plan;

pub use plan::{
    ComparisonMetric, ComparisonResult, Confidence, CostAssumptions, CostScenario,
    MetricWinner, PlanComparisonEngine, PlanScenarioCost, QuickComparison, ScenarioOutcome,
};
