//! COBRA continuation-coverage decision analysis
//!
//! Compares the estimated unsubsidized COBRA cost against the household's
//! marketplace alternatives inside the 18-month eligibility window. The
//! markup and range spread are policy assumptions, not derived invariants,
//! so they live on the analyzer and can be overridden per instance.

use serde::{Deserialize, Serialize};

/// Federal COBRA eligibility window in months from job loss
pub const ELIGIBILITY_MONTHS: u32 = 18;

/// Default markup over the employer-subsidized premium: loss of employer
/// contribution plus the 2% administrative fee
pub const DEFAULT_COST_MARKUP: f64 = 3.5;

/// Default half-width of the reported cost range
pub const DEFAULT_RANGE_SPREAD: f64 = 0.10;

/// Remaining-window length that makes short-term continuation worth it
const SHORT_WINDOW_MONTHS: u32 = 3;

/// Overall classification of the continuation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CobraDecision {
    WorthIt,
    NotWorthIt,
}

/// One step of the fixed decision flowchart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowchartQuestion {
    pub question: String,
    pub if_yes: String,
    pub if_no: String,
}

/// Result of a COBRA continuation analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CobraAnalysis {
    /// Whether any eligibility window remains
    pub eligible: bool,

    /// Months left in the 18-month window
    pub months_remaining: u32,

    /// Point estimate of the unsubsidized monthly COBRA cost
    pub estimated_monthly_cost: f64,

    /// Estimated cost range (low, high)
    pub cost_range: (f64, f64),

    /// Overall classification
    pub decision: CobraDecision,

    /// Reasons supporting the classification, in priority order
    pub reasons: Vec<String>,

    /// Caveats to revisit
    pub caveats: Vec<String>,

    /// Time-sensitive warnings
    pub warnings: Vec<String>,

    /// Monthly savings from switching to the alternative midpoint
    /// (positive when switching is cheaper)
    pub monthly_savings_if_switch: f64,

    /// Fixed decision flowchart, always attached
    pub flowchart: Vec<FlowchartQuestion>,
}

/// COBRA continuation analyzer
#[derive(Debug, Clone)]
pub struct CobraAnalyzer {
    /// Markup applied to the subsidized premium
    pub cost_markup: f64,

    /// Half-width of the reported cost range
    pub range_spread: f64,
}

impl Default for CobraAnalyzer {
    fn default() -> Self {
        Self {
            cost_markup: DEFAULT_COST_MARKUP,
            range_spread: DEFAULT_RANGE_SPREAD,
        }
    }
}

impl CobraAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze continuation against a marketplace alternative cost range
    pub fn analyze(
        &self,
        current_monthly_cost: f64,
        months_since_job_loss: u32,
        has_preexisting_conditions: bool,
        alternative_cost_range: (f64, f64),
    ) -> CobraAnalysis {
        let months_remaining = ELIGIBILITY_MONTHS.saturating_sub(months_since_job_loss);
        let estimated = current_monthly_cost * self.cost_markup;
        let cost_range = (
            estimated * (1.0 - self.range_spread),
            estimated * (1.0 + self.range_spread),
        );

        let (alt_low, alt_high) = alternative_cost_range;
        let alt_mid = (alt_low + alt_high) / 2.0;
        let monthly_savings_if_switch = estimated - alt_mid;

        let mut reasons = Vec::new();
        let mut caveats = Vec::new();
        let mut warnings = Vec::new();

        // Decision policy, in priority order
        let decision = if (1..=SHORT_WINDOW_MONTHS).contains(&months_remaining) {
            reasons.push(format!(
                "Only {} month(s) of eligibility remain; continuation keeps coverage \
                 seamless while you transition to a new plan.",
                months_remaining
            ));
            CobraDecision::WorthIt
        } else if has_preexisting_conditions && months_remaining > 0 {
            reasons.push(
                "Ongoing treatment for a pre-existing condition favors keeping the \
                 current network and deductible progress."
                    .to_string(),
            );
            caveats.push(
                "Re-evaluate at the next open enrollment: marketplace plans must \
                 cover pre-existing conditions."
                    .to_string(),
            );
            CobraDecision::WorthIt
        } else if months_remaining > 0 && cost_range.1 < alt_low {
            reasons.push(format!(
                "Estimated COBRA cost (${:.0}/mo) is below the cheapest alternative \
                 (${:.0}/mo), which is rare; verify the alternative quotes.",
                estimated, alt_low
            ));
            CobraDecision::WorthIt
        } else {
            reasons.push(format!(
                "Switching saves about ${:.0}/month (${:.0}/year) versus the \
                 estimated COBRA cost.",
                monthly_savings_if_switch,
                monthly_savings_if_switch * 12.0
            ));
            CobraDecision::NotWorthIt
        };

        if months_remaining == 0 {
            warnings.push(
                "The 18-month COBRA election window has expired; continuation is no \
                 longer available."
                    .to_string(),
            );
        } else if months_remaining <= SHORT_WINDOW_MONTHS {
            warnings.push(format!(
                "Time-sensitive: only {} month(s) of COBRA eligibility remain.",
                months_remaining
            ));
        }

        CobraAnalysis {
            eligible: months_remaining > 0,
            months_remaining,
            estimated_monthly_cost: estimated,
            cost_range,
            decision,
            reasons,
            caveats,
            warnings,
            monthly_savings_if_switch,
            flowchart: Self::flowchart(),
        }
    }

    /// The fixed four-question decision flowchart
    fn flowchart() -> Vec<FlowchartQuestion> {
        vec![
            FlowchartQuestion {
                question: "Do you expect to start a job with benefits within 1-2 months?"
                    .to_string(),
                if_yes: "Short-term COBRA bridges the gap without switching networks."
                    .to_string(),
                if_no: "Compare marketplace plans before electing COBRA.".to_string(),
            },
            FlowchartQuestion {
                question: "Are you or a dependent in active treatment?".to_string(),
                if_yes: "Continuation preserves your providers and deductible progress."
                    .to_string(),
                if_no: "A new plan's network reset likely costs you little.".to_string(),
            },
            FlowchartQuestion {
                question: "Do you qualify for a COBRA premium subsidy?".to_string(),
                if_yes: "Subsidized COBRA can beat marketplace pricing; re-run the numbers."
                    .to_string(),
                if_no: "Expect to pay the full unsubsidized premium plus the admin fee."
                    .to_string(),
            },
            FlowchartQuestion {
                question: "Can you afford $1,500-2,000 per month in premiums?".to_string(),
                if_yes: "COBRA is viable while you decide.".to_string(),
                if_no: "Prioritize marketplace or Medicaid options immediately.".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_window_worth_it_with_urgency() {
        let analyzer = CobraAnalyzer::new();
        let analysis = analyzer.analyze(500.0, 16, false, (900.0, 1200.0));

        assert_eq!(analysis.months_remaining, 2);
        assert!(analysis.eligible);
        assert_eq!(analysis.decision, CobraDecision::WorthIt);
        assert_eq!(analysis.warnings.len(), 1);
        assert!(analysis.warnings[0].contains("Time-sensitive"));
    }

    #[test]
    fn test_expired_window_not_worth_it() {
        let analyzer = CobraAnalyzer::new();
        let analysis = analyzer.analyze(500.0, 20, false, (900.0, 1200.0));

        assert_eq!(analysis.months_remaining, 0);
        assert!(!analysis.eligible);
        assert_eq!(analysis.decision, CobraDecision::NotWorthIt);
        assert!(analysis.warnings[0].contains("expired"));
    }

    #[test]
    fn test_expired_window_ignores_preexisting() {
        // The pre-existing rule requires time remaining
        let analyzer = CobraAnalyzer::new();
        let analysis = analyzer.analyze(500.0, 24, true, (900.0, 1200.0));

        assert_eq!(analysis.decision, CobraDecision::NotWorthIt);
        assert!(analysis.caveats.is_empty());
    }

    #[test]
    fn test_preexisting_with_time_remaining() {
        let analyzer = CobraAnalyzer::new();
        let analysis = analyzer.analyze(500.0, 6, true, (900.0, 1200.0));

        assert_eq!(analysis.months_remaining, 12);
        assert_eq!(analysis.decision, CobraDecision::WorthIt);
        assert!(analysis.caveats[0].contains("open enrollment"));
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_cost_markup_and_range() {
        let analyzer = CobraAnalyzer::new();
        let analysis = analyzer.analyze(400.0, 6, false, (2000.0, 2400.0));

        assert!((analysis.estimated_monthly_cost - 1400.0).abs() < 1e-9);
        assert!((analysis.cost_range.0 - 1260.0).abs() < 1e-9);
        assert!((analysis.cost_range.1 - 1540.0).abs() < 1e-9);
    }

    #[test]
    fn test_cheap_cobra_is_rare_but_worth_it() {
        let analyzer = CobraAnalyzer::new();
        // COBRA range high = 1540, below the 2000 alternative floor
        let analysis = analyzer.analyze(400.0, 6, false, (2000.0, 2400.0));

        assert_eq!(analysis.decision, CobraDecision::WorthIt);
        assert!(analysis.reasons[0].contains("rare"));
    }

    #[test]
    fn test_not_worth_it_states_savings() {
        let analyzer = CobraAnalyzer::new();
        let analysis = analyzer.analyze(500.0, 6, false, (900.0, 1100.0));

        assert_eq!(analysis.decision, CobraDecision::NotWorthIt);
        // 1750 estimated vs 1000 midpoint
        assert!((analysis.monthly_savings_if_switch - 750.0).abs() < 1e-9);
        assert!(analysis.reasons[0].contains("$750"));
    }

    #[test]
    fn test_flowchart_always_attached() {
        let analyzer = CobraAnalyzer::new();

        for months in [0, 6, 17, 30] {
            let analysis = analyzer.analyze(500.0, months, false, (900.0, 1200.0));
            assert_eq!(analysis.flowchart.len(), 4);
        }
    }

    #[test]
    fn test_markup_is_overridable() {
        let analyzer = CobraAnalyzer {
            cost_markup: 2.0,
            ..CobraAnalyzer::default()
        };
        let analysis = analyzer.analyze(500.0, 6, false, (900.0, 1200.0));

        assert!((analysis.estimated_monthly_cost - 1000.0).abs() < 1e-9);
    }
}
