//! Plan comparison across weighted metrics and utilization scenarios
//!
//! Two plan offers are scored on a weighted metric set and on a fixed
//! family of annual-cost scenarios. Scenario out-of-pocket costs separate
//! copay-covered services (paid per visit, never subject to the
//! deductible) from deductible-subject spending (full list price up to
//! the deductible, coinsurance above it), with the member total capped at
//! the plan's out-of-pocket maximum.

use serde::{Deserialize, Serialize};

use crate::household::{
    NetworkType, PlanOffer, PrescriptionTier, RiskTolerance, UtilizationProfile,
};

/// Service list prices and materiality thresholds used by the cost model.
/// These are assumption choices, not invariants, so they are overridable.
#[derive(Debug, Clone)]
pub struct CostAssumptions {
    /// List price of a primary-care visit
    pub primary_visit: f64,

    /// List price of a specialist visit
    pub specialist_visit: f64,

    /// List price of an ER visit
    pub er_visit: f64,

    /// Monthly list price per prescription, by formulary tier
    pub generic_rx_monthly: f64,
    pub preferred_rx_monthly: f64,
    pub specialty_rx_monthly: f64,

    /// List price of a major planned procedure
    pub major_procedure: f64,

    /// Monthly premium gap that counts as a key difference
    pub material_premium_gap: f64,

    /// Deductible gap that counts as a key difference
    pub material_deductible_gap: f64,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            primary_visit: 175.0,
            specialist_visit: 320.0,
            er_visit: 1_900.0,
            generic_rx_monthly: 25.0,
            preferred_rx_monthly: 80.0,
            specialty_rx_monthly: 450.0,
            major_procedure: 28_000.0,
            material_premium_gap: 50.0,
            material_deductible_gap: 500.0,
        }
    }
}

/// A named utilization archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostScenario {
    pub name: String,
    pub primary_visits: u32,
    pub specialist_visits: u32,
    pub er_visits: u32,
    pub monthly_prescriptions: u32,
    pub prescription_tier: PrescriptionTier,
    pub includes_procedure: bool,
}

impl CostScenario {
    fn new(
        name: &str,
        primary_visits: u32,
        specialist_visits: u32,
        er_visits: u32,
        monthly_prescriptions: u32,
        prescription_tier: PrescriptionTier,
        includes_procedure: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            primary_visits,
            specialist_visits,
            er_visits,
            monthly_prescriptions,
            prescription_tier,
            includes_procedure,
        }
    }

    /// The fixed archetypes every comparison runs
    pub fn standard_set() -> Vec<CostScenario> {
        vec![
            Self::new("Healthy Year", 1, 0, 0, 0, PrescriptionTier::Generic, false),
            Self::new("Moderate Usage", 3, 2, 0, 1, PrescriptionTier::Generic, false),
            Self::new("Chronic Condition", 6, 8, 1, 3, PrescriptionTier::Preferred, false),
            Self::new("Major Medical Event", 4, 6, 2, 1, PrescriptionTier::Generic, true),
        ]
    }

    /// Scenario built from a caller-supplied utilization profile
    pub fn from_profile(profile: &UtilizationProfile) -> CostScenario {
        Self::new(
            "Your Expected Usage",
            profile.primary_visits,
            profile.specialist_visits,
            profile.er_visits,
            profile.monthly_prescriptions,
            profile.prescription_tier,
            profile.planned_procedure,
        )
    }
}

/// One plan's projected cost under a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanScenarioCost {
    /// Annual premium paid regardless of utilization
    pub annual_premium: f64,

    /// Annual out-of-pocket, capped at the plan's OOP maximum
    pub out_of_pocket: f64,

    /// Premium plus out-of-pocket
    pub total: f64,
}

/// Per-metric or per-scenario winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricWinner {
    PlanA,
    PlanB,
    Tie,
}

/// Both plans' projected costs under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: CostScenario,
    pub plan_a: PlanScenarioCost,
    pub plan_b: PlanScenarioCost,
    pub cheaper: MetricWinner,
}

/// One weighted comparison metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetric {
    pub name: String,
    pub value_a: f64,
    pub value_b: f64,

    /// Importance weight, 1-5
    pub weight: u8,

    /// Whether the lower value wins this metric
    pub lower_is_better: bool,

    pub winner: MetricWinner,
}

impl ComparisonMetric {
    fn new(name: &str, value_a: f64, value_b: f64, weight: u8, lower_is_better: bool) -> Self {
        let winner = if value_a == value_b {
            MetricWinner::Tie
        } else if (value_a < value_b) == lower_is_better {
            MetricWinner::PlanA
        } else {
            MetricWinner::PlanB
        };
        Self {
            name: name.to_string(),
            value_a,
            value_b,
            weight,
            lower_is_better,
            winner,
        }
    }
}

/// Confidence classification of the overall winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Moderate,
    Low,
}

/// Full result of a two-plan comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metrics: Vec<ComparisonMetric>,
    pub scenarios: Vec<ScenarioOutcome>,
    pub overall_winner: MetricWinner,
    pub confidence: Confidence,
    pub reasons: Vec<String>,
    pub caveats: Vec<String>,
    pub key_differences: Vec<String>,
}

/// Lightweight comparison flags for call sites that only need direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickComparison {
    pub cheaper_monthly: MetricWinner,
    pub cheaper_healthy_year: MetricWinner,
    pub cheaper_high_usage: MetricWinner,
    pub better_oop_protection: MetricWinner,
}

/// Plan comparison engine over a set of cost assumptions
#[derive(Debug, Clone, Default)]
pub struct PlanComparisonEngine {
    costs: CostAssumptions,
}

impl PlanComparisonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumptions(costs: CostAssumptions) -> Self {
        Self { costs }
    }

    /// Compare two plan offers across weighted metrics and cost scenarios
    pub fn compare(
        &self,
        plan_a: &PlanOffer,
        plan_b: &PlanOffer,
        profile: Option<&UtilizationProfile>,
    ) -> ComparisonResult {
        let metrics = self.build_metrics(plan_a, plan_b, profile);

        let mut scenario_defs = CostScenario::standard_set();
        if let Some(profile) = profile {
            scenario_defs.push(CostScenario::from_profile(profile));
        }
        let scenarios: Vec<ScenarioOutcome> = scenario_defs
            .into_iter()
            .map(|s| self.run_scenario(plan_a, plan_b, s))
            .collect();

        let (overall_winner, confidence) = Self::aggregate(&metrics);
        let reasons = self.build_reasons(plan_a, plan_b, overall_winner, &scenarios, profile);
        let caveats = Self::build_caveats(plan_a, plan_b, overall_winner, profile);
        let key_differences = self.key_differences(plan_a, plan_b);

        ComparisonResult {
            metrics,
            scenarios,
            overall_winner,
            confidence,
            reasons,
            caveats,
            key_differences,
        }
    }

    /// Direction-only comparison for lightweight call sites
    pub fn quick_comparison(&self, plan_a: &PlanOffer, plan_b: &PlanOffer) -> QuickComparison {
        let healthy = self.run_scenario(
            plan_a,
            plan_b,
            CostScenario::new("Healthy Year", 1, 0, 0, 0, PrescriptionTier::Generic, false),
        );
        let sick = self.run_scenario(
            plan_a,
            plan_b,
            CostScenario::new("Major Medical Event", 4, 6, 2, 1, PrescriptionTier::Generic, true),
        );

        QuickComparison {
            cheaper_monthly: lower_wins(plan_a.monthly_premium, plan_b.monthly_premium),
            cheaper_healthy_year: healthy.cheaper,
            cheaper_high_usage: sick.cheaper,
            better_oop_protection: lower_wins(plan_a.oop_max, plan_b.oop_max),
        }
    }

    /// Annual out-of-pocket for one plan under a scenario, capped at the
    /// plan's out-of-pocket maximum
    pub fn annual_out_of_pocket(&self, plan: &PlanOffer, scenario: &CostScenario) -> f64 {
        // Copay-covered services: paid per visit, never deductible-subject
        let mut copay_total = scenario.primary_visits as f64 * plan.copays.primary
            + scenario.specialist_visits as f64 * plan.copays.specialist
            + scenario.er_visits as f64 * plan.copays.er;

        // Prescriptions: generics ride the copay; higher tiers are
        // deductible-subject at list price
        let annual_fills = scenario.monthly_prescriptions as f64 * 12.0;
        let mut deductible_subject = 0.0;
        match scenario.prescription_tier {
            PrescriptionTier::Generic => copay_total += annual_fills * plan.copays.generic_rx,
            PrescriptionTier::Preferred => {
                deductible_subject += annual_fills * self.costs.preferred_rx_monthly
            }
            PrescriptionTier::Specialty => {
                deductible_subject += annual_fills * self.costs.specialty_rx_monthly
            }
        }

        if scenario.includes_procedure {
            deductible_subject += self.costs.major_procedure;
        }

        let deductible_portion = if deductible_subject <= plan.deductible {
            deductible_subject
        } else {
            plan.deductible + plan.coinsurance * (deductible_subject - plan.deductible)
        };

        (copay_total + deductible_portion).min(plan.oop_max)
    }

    fn run_scenario(
        &self,
        plan_a: &PlanOffer,
        plan_b: &PlanOffer,
        scenario: CostScenario,
    ) -> ScenarioOutcome {
        let cost_for = |plan: &PlanOffer| {
            let out_of_pocket = self.annual_out_of_pocket(plan, &scenario);
            PlanScenarioCost {
                annual_premium: plan.annual_premium(),
                out_of_pocket,
                total: plan.annual_premium() + out_of_pocket,
            }
        };

        let plan_a_cost = cost_for(plan_a);
        let plan_b_cost = cost_for(plan_b);

        ScenarioOutcome {
            cheaper: lower_wins(plan_a_cost.total, plan_b_cost.total),
            scenario,
            plan_a: plan_a_cost,
            plan_b: plan_b_cost,
        }
    }

    fn build_metrics(
        &self,
        a: &PlanOffer,
        b: &PlanOffer,
        profile: Option<&UtilizationProfile>,
    ) -> Vec<ComparisonMetric> {
        // Low risk tolerance raises the worst-case-exposure metric to top weight
        let oop_weight = match profile.map(|p| p.risk_tolerance) {
            Some(RiskTolerance::Low) => 5,
            _ => 4,
        };

        vec![
            ComparisonMetric::new("Monthly premium", a.monthly_premium, b.monthly_premium, 5, true),
            ComparisonMetric::new("Deductible", a.deductible, b.deductible, 4, true),
            ComparisonMetric::new("Out-of-pocket maximum", a.oop_max, b.oop_max, oop_weight, true),
            ComparisonMetric::new("Coinsurance", a.coinsurance, b.coinsurance, 2, true),
            ComparisonMetric::new(
                "HSA eligibility",
                if a.hsa_eligible { 1.0 } else { 0.0 },
                if b.hsa_eligible { 1.0 } else { 0.0 },
                2,
                false,
            ),
            ComparisonMetric::new(
                "Quality rating",
                a.quality_rating as f64,
                b.quality_rating as f64,
                3,
                false,
            ),
        ]
    }

    fn aggregate(metrics: &[ComparisonMetric]) -> (MetricWinner, Confidence) {
        let mut score_a = 0u32;
        let mut score_b = 0u32;
        for metric in metrics {
            match metric.winner {
                MetricWinner::PlanA => score_a += metric.weight as u32,
                MetricWinner::PlanB => score_b += metric.weight as u32,
                MetricWinner::Tie => {}
            }
        }

        let decided = score_a + score_b;
        if decided == 0 || score_a == score_b {
            return (MetricWinner::Tie, Confidence::Low);
        }

        let margin = score_a.abs_diff(score_b) as f64 / decided as f64;
        let confidence = if margin >= 0.5 {
            Confidence::High
        } else if margin >= 0.25 {
            Confidence::Moderate
        } else {
            Confidence::Low
        };

        let winner = if score_a > score_b {
            MetricWinner::PlanA
        } else {
            MetricWinner::PlanB
        };
        (winner, confidence)
    }

    fn build_reasons(
        &self,
        a: &PlanOffer,
        b: &PlanOffer,
        winner: MetricWinner,
        scenarios: &[ScenarioOutcome],
        profile: Option<&UtilizationProfile>,
    ) -> Vec<String> {
        let mut reasons = Vec::new();

        let (winning, losing, label) = match winner {
            MetricWinner::PlanA => (a, b, "Plan A"),
            MetricWinner::PlanB => (b, a, "Plan B"),
            MetricWinner::Tie => {
                reasons.push(
                    "The weighted metrics split evenly; choose on network fit and \
                     preferred providers."
                        .to_string(),
                );
                return reasons;
            }
        };

        if winning.monthly_premium < losing.monthly_premium {
            reasons.push(format!(
                "{} saves ${:.0}/month in premium.",
                label,
                losing.monthly_premium - winning.monthly_premium
            ));
        }
        if winning.oop_max < losing.oop_max {
            reasons.push(format!(
                "{} caps worst-case annual exposure at ${:.0} (vs ${:.0}).",
                label, winning.oop_max, losing.oop_max
            ));
        }

        // Surface OOP protection explicitly for cautious, high-utilization users
        if let Some(profile) = profile {
            let chronic_usage = profile.specialist_visits >= 4
                || profile.monthly_prescriptions >= 2
                || profile.planned_procedure;
            if profile.risk_tolerance == RiskTolerance::Low && chronic_usage {
                reasons.push(
                    "With low risk tolerance and steady utilization, the \
                     out-of-pocket maximum is your primary protection; weight it \
                     over premium savings."
                        .to_string(),
                );
            }
            if profile.prefers_low_premium {
                reasons.push(
                    "You indicated premium cost matters most; the scenario table \
                     shows what that trade costs in a high-utilization year."
                        .to_string(),
                );
            }
        }

        if let Some(expected) = scenarios.iter().find(|s| s.scenario.name == "Your Expected Usage")
        {
            let (cheaper_total, usage_label) = match expected.cheaper {
                MetricWinner::PlanA => (expected.plan_a.total, "Plan A"),
                MetricWinner::PlanB => (expected.plan_b.total, "Plan B"),
                MetricWinner::Tie => (expected.plan_a.total, "either plan"),
            };
            reasons.push(format!(
                "Under your expected usage, {} comes to about ${:.0} for the year.",
                usage_label, cheaper_total
            ));
        }

        reasons
    }

    fn build_caveats(
        a: &PlanOffer,
        b: &PlanOffer,
        winner: MetricWinner,
        profile: Option<&UtilizationProfile>,
    ) -> Vec<String> {
        let mut caveats = vec![
            "Scenario costs use assumed service prices; actual negotiated rates vary \
             by provider."
                .to_string(),
        ];

        let winning = match winner {
            MetricWinner::PlanA => Some(a),
            MetricWinner::PlanB => Some(b),
            MetricWinner::Tie => None,
        };
        if let Some(plan) = winning {
            if plan.quality_rating <= 2 {
                caveats.push(format!(
                    "The recommended plan carries a {}-star quality rating; check \
                     member-satisfaction details.",
                    plan.quality_rating
                ));
            }
            if plan.network == NetworkType::Hmo {
                caveats.push(
                    "HMO networks require referrals and in-network care; confirm your \
                     providers participate."
                        .to_string(),
                );
            }
        }

        if profile.map(|p| p.planned_procedure).unwrap_or(false) {
            caveats.push(
                "A planned procedure usually reaches the deductible; compare the \
                 Major Medical Event scenario closely."
                    .to_string(),
            );
        }

        caveats
    }

    fn key_differences(&self, a: &PlanOffer, b: &PlanOffer) -> Vec<String> {
        let mut diffs = Vec::new();

        let premium_gap = (a.monthly_premium - b.monthly_premium).abs();
        if premium_gap >= self.costs.material_premium_gap {
            diffs.push(format!(
                "Premiums differ by ${:.0}/month (${:.0} vs ${:.0}).",
                premium_gap, a.monthly_premium, b.monthly_premium
            ));
        }

        let deductible_gap = (a.deductible - b.deductible).abs();
        if deductible_gap >= self.costs.material_deductible_gap {
            diffs.push(format!(
                "Deductibles differ by ${:.0} (${:.0} vs ${:.0}).",
                deductible_gap, a.deductible, b.deductible
            ));
        }

        if a.network != b.network {
            diffs.push(format!(
                "Network types differ: {} vs {}; provider access rules are not \
                 comparable dollar-for-dollar.",
                a.network.as_str(),
                b.network.as_str()
            ));
        }

        diffs
    }
}

fn lower_wins(a: f64, b: f64) -> MetricWinner {
    if a < b {
        MetricWinner::PlanA
    } else if b < a {
        MetricWinner::PlanB
    } else {
        MetricWinner::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{Copays, MetalTier};

    fn bronze_plan() -> PlanOffer {
        PlanOffer {
            id: "FL-BR-101".to_string(),
            issuer: "Sunshine Health".to_string(),
            metal_tier: MetalTier::Bronze,
            network: NetworkType::Hmo,
            monthly_premium: 310.0,
            deductible: 7_000.0,
            oop_max: 9_100.0,
            copays: Copays {
                primary: 45.0,
                specialist: 95.0,
                er: 500.0,
                generic_rx: 20.0,
            },
            coinsurance: 0.40,
            hsa_eligible: true,
            quality_rating: 3,
        }
    }

    fn gold_plan() -> PlanOffer {
        PlanOffer {
            id: "FL-GD-207".to_string(),
            issuer: "Coastal Mutual".to_string(),
            metal_tier: MetalTier::Gold,
            network: NetworkType::Ppo,
            monthly_premium: 540.0,
            deductible: 1_200.0,
            oop_max: 4_500.0,
            copays: Copays {
                primary: 20.0,
                specialist: 45.0,
                er: 250.0,
                generic_rx: 10.0,
            },
            coinsurance: 0.20,
            hsa_eligible: false,
            quality_rating: 4,
        }
    }

    fn heavy_profile() -> UtilizationProfile {
        UtilizationProfile {
            primary_visits: 5,
            specialist_visits: 6,
            er_visits: 1,
            monthly_prescriptions: 2,
            prescription_tier: PrescriptionTier::Preferred,
            planned_procedure: false,
            risk_tolerance: RiskTolerance::Low,
            prefers_low_premium: false,
        }
    }

    #[test]
    fn test_metric_winners() {
        let engine = PlanComparisonEngine::new();
        let result = engine.compare(&bronze_plan(), &gold_plan(), None);

        let by_name = |name: &str| {
            result
                .metrics
                .iter()
                .find(|m| m.name == name)
                .unwrap()
                .winner
        };

        assert_eq!(by_name("Monthly premium"), MetricWinner::PlanA);
        assert_eq!(by_name("Deductible"), MetricWinner::PlanB);
        assert_eq!(by_name("Out-of-pocket maximum"), MetricWinner::PlanB);
        assert_eq!(by_name("HSA eligibility"), MetricWinner::PlanA);
        assert_eq!(by_name("Quality rating"), MetricWinner::PlanB);
    }

    #[test]
    fn test_scenario_oop_capped() {
        let engine = PlanComparisonEngine::new();
        let result = engine.compare(&bronze_plan(), &gold_plan(), None);

        for outcome in &result.scenarios {
            assert!(outcome.plan_a.out_of_pocket <= bronze_plan().oop_max + 1e-9);
            assert!(outcome.plan_b.out_of_pocket <= gold_plan().oop_max + 1e-9);
            assert!(
                (outcome.plan_a.total
                    - (outcome.plan_a.annual_premium + outcome.plan_a.out_of_pocket))
                    .abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn test_major_event_hits_bronze_cap() {
        let engine = PlanComparisonEngine::new();
        let plan = bronze_plan();
        let major = CostScenario::standard_set()
            .into_iter()
            .find(|s| s.name == "Major Medical Event")
            .unwrap();

        // $28k procedure blows through the deductible and coinsurance to the cap
        let oop = engine.annual_out_of_pocket(&plan, &major);
        assert_eq!(oop, plan.oop_max);
    }

    #[test]
    fn test_healthy_year_is_copays_only() {
        let engine = PlanComparisonEngine::new();
        let plan = gold_plan();
        let healthy = CostScenario::standard_set()
            .into_iter()
            .find(|s| s.name == "Healthy Year")
            .unwrap();

        let oop = engine.annual_out_of_pocket(&plan, &healthy);
        assert_eq!(oop, plan.copays.primary);
    }

    #[test]
    fn test_standard_scenarios_without_profile() {
        let engine = PlanComparisonEngine::new();
        let result = engine.compare(&bronze_plan(), &gold_plan(), None);

        let names: Vec<&str> = result
            .scenarios
            .iter()
            .map(|s| s.scenario.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Healthy Year", "Moderate Usage", "Chronic Condition", "Major Medical Event"]
        );
    }

    #[test]
    fn test_profile_adds_expected_usage_scenario() {
        let engine = PlanComparisonEngine::new();
        let profile = heavy_profile();
        let result = engine.compare(&bronze_plan(), &gold_plan(), Some(&profile));

        assert_eq!(result.scenarios.len(), 5);
        let expected = result
            .scenarios
            .iter()
            .find(|s| s.scenario.name == "Your Expected Usage")
            .unwrap();
        assert_eq!(expected.scenario.specialist_visits, 6);
    }

    #[test]
    fn test_identical_plans_tie() {
        let engine = PlanComparisonEngine::new();
        let plan = gold_plan();
        let result = engine.compare(&plan, &plan, None);

        assert_eq!(result.overall_winner, MetricWinner::Tie);
        assert!(result.metrics.iter().all(|m| m.winner == MetricWinner::Tie));
        assert!(result.key_differences.is_empty());
    }

    #[test]
    fn test_low_risk_tolerance_surfaces_oop_protection() {
        let engine = PlanComparisonEngine::new();
        let profile = heavy_profile();
        let result = engine.compare(&bronze_plan(), &gold_plan(), Some(&profile));

        // OOP-max weight is raised to 5 for low risk tolerance
        let oop_metric = result
            .metrics
            .iter()
            .find(|m| m.name == "Out-of-pocket maximum")
            .unwrap();
        assert_eq!(oop_metric.weight, 5);

        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("out-of-pocket maximum")));
    }

    #[test]
    fn test_key_differences_triggered() {
        let engine = PlanComparisonEngine::new();
        let result = engine.compare(&bronze_plan(), &gold_plan(), None);

        // $230/mo premium gap, $5,800 deductible gap, HMO vs PPO
        assert_eq!(result.key_differences.len(), 3);
        assert!(result.key_differences[2].contains("HMO"));
    }

    #[test]
    fn test_quick_comparison_flags() {
        let engine = PlanComparisonEngine::new();
        let quick = engine.quick_comparison(&bronze_plan(), &gold_plan());

        assert_eq!(quick.cheaper_monthly, MetricWinner::PlanA);
        // Bronze premiums stay ahead in a healthy year
        assert_eq!(quick.cheaper_healthy_year, MetricWinner::PlanA);
        // A major event favors the gold plan's cap
        assert_eq!(quick.cheaper_high_usage, MetricWinner::PlanB);
        assert_eq!(quick.better_oop_protection, MetricWinner::PlanB);
    }

    #[test]
    fn test_confidence_classification() {
        let engine = PlanComparisonEngine::new();

        // Gold takes deductible(4) + oop(4) + coinsurance(2) + quality(3) = 13,
        // bronze takes premium(5) + hsa(2) = 7; margin 6/20 lands in Moderate
        let result = engine.compare(&bronze_plan(), &gold_plan(), None);

        assert_eq!(result.overall_winner, MetricWinner::PlanB);
        assert_eq!(result.confidence, Confidence::Moderate);
    }
}
