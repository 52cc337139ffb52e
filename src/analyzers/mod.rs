//! Specialized decision analyzers: COBRA continuation and HSA tax benefit

mod cobra;
mod hsa;

pub use cobra::{CobraAnalysis, CobraAnalyzer, CobraDecision, FlowchartQuestion};
pub use hsa::{GrowthProjection, HsaAnalysis, HsaAnalyzer, HsaStrategy, TaxSavings};
