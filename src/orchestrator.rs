//! Top-level recommendation composition
//!
//! Owns the rating tables, comparison engine, analyzers, and the audit log
//! for its lifetime. Every calculation it runs is recorded through the
//! audit log. A household that fails the completeness gate yields no
//! recommendation; that is insufficient input, not a fault.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analyzers::{CobraAnalysis, CobraAnalyzer, HsaAnalysis, HsaAnalyzer};
use crate::audit::CalculationLog;
use crate::comparison::PlanComparisonEngine;
use crate::household::{
    BudgetPreference, CurrentCoverage, Household, MetalTier, UtilizationLevel,
    UtilizationProfile,
};
use crate::pricing::{HouseholdPremium, PremiumCalculator};
use crate::rating::RatingTables;

/// Share of monthly income above which a tier is stepped down.
/// Premiums here are full price: no subsidy estimation happens in this core.
const AFFORDABILITY_SHARE: f64 = 0.35;

/// Default state income-tax rate assumed for HSA analysis when the caller
/// supplies none
const DEFAULT_STATE_TAX_RATE: f64 = 0.05;

/// Medicare eligibility age
const MEDICARE_AGE: u8 = 65;

/// Spread applied around the point estimate for the quoted cost range
const COST_RANGE_LOW: f64 = 0.95;
const COST_RANGE_HIGH: f64 = 1.10;

/// A ranked non-selected option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOption {
    pub rank: usize,
    pub tier: MetalTier,
    pub monthly_premium: f64,
    pub summary: String,
}

/// Medicare-Advantage fit note attached when adults are 65+
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicareFit {
    pub eligible_adults: usize,
    pub note: String,
}

/// Final recommendation object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Human-readable insurance type ("Marketplace Silver", ...)
    pub insurance_type: String,

    /// Selected metal tier
    pub selected_tier: MetalTier,

    /// Estimated monthly premium for the household at the selected tier
    pub estimated_monthly_premium: f64,

    /// Estimated monthly cost range around the point estimate
    pub monthly_cost_range: (f64, f64),

    /// Coverage-gap score, 0-100; higher means the tier leaves more of the
    /// household's expected needs exposed
    pub coverage_gap_score: f64,

    /// Reasoning lines behind the selection
    pub reasoning: Vec<String>,

    /// Ranked alternative tiers
    pub alternatives: Vec<RankedOption>,

    /// Medicare-Advantage fit, when any adult is 65+
    pub medicare_fit: Option<MedicareFit>,

    /// COBRA continuation analysis, when employer coverage is ending
    pub cobra: Option<CobraAnalysis>,

    /// HSA tax-benefit analysis, when the selection is HSA-compatible
    pub hsa: Option<HsaAnalysis>,
}

/// Top-level orchestrator
#[derive(Debug)]
pub struct RecommendationOrchestrator {
    calculator: PremiumCalculator,
    comparison: PlanComparisonEngine,
    cobra: CobraAnalyzer,
    hsa: HsaAnalyzer,
    audit: CalculationLog,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over the default rating tables
    pub fn new() -> Self {
        Self::with_tables(RatingTables::default_rating())
    }

    /// Create an orchestrator over specific rating tables
    pub fn with_tables(tables: RatingTables) -> Self {
        Self {
            calculator: PremiumCalculator::new(tables),
            comparison: PlanComparisonEngine::new(),
            cobra: CobraAnalyzer::new(),
            hsa: HsaAnalyzer::new(),
            audit: CalculationLog::new(),
        }
    }

    /// The audit log recording every calculation this orchestrator ran
    pub fn audit(&self) -> &CalculationLog {
        &self.audit
    }

    /// The underlying premium calculator
    pub fn calculator(&self) -> &PremiumCalculator {
        &self.calculator
    }

    /// The plan comparison engine
    pub fn comparison(&self) -> &PlanComparisonEngine {
        &self.comparison
    }

    /// Produce a recommendation for a household.
    ///
    /// Returns `None` when required household fields are absent; callers
    /// treat that as "insufficient input".
    pub fn recommend(
        &self,
        household: &Household,
        profile: Option<&UtilizationProfile>,
        current: Option<&CurrentCoverage>,
    ) -> Option<Recommendation> {
        if !household.is_complete() {
            log::warn!("household missing residences or adults; declining to recommend");
            return None;
        }
        let state = household.primary_state()?.to_string();

        // A supplied utilization profile refines the household's coarse
        // signals before tier selection and gap scoring
        let mut household = household.clone();
        if let Some(profile) = profile {
            if profile.planned_procedure {
                household.planned_procedure = true;
            }
            if profile.specialist_visits >= 4
                || profile.er_visits >= 2
                || profile.monthly_prescriptions >= 2
            {
                household.utilization = UtilizationLevel::High;
            }
        }
        let household = &household;

        // Price the household across the four ordered tiers, audit-wrapped
        let household_input = json!({
            "state": state,
            "adult_ages": household.adult_ages,
            "child_ages": household.child_ages,
            "tobacco_use": household.tobacco_use,
        });
        let tier_premiums: Vec<(MetalTier, HouseholdPremium)> =
            self.audit.record("household_tier_pricing", household_input, || {
                MetalTier::ordered()
                    .into_iter()
                    .map(|tier| (tier, self.calculator.price_household(household, tier)))
                    .collect()
            });

        let selected_tier = self.select_tier(household, &tier_premiums);
        let selected_premium = premium_for(&tier_premiums, selected_tier);

        let coverage_gap_score = self.audit.record(
            "coverage_gap_score",
            json!({
                "tier": selected_tier.as_str(),
                "utilization": household.utilization,
                "planned_procedure": household.planned_procedure,
            }),
            || coverage_gap(selected_tier, household),
        );

        let reasoning = self.build_reasoning(household, selected_tier, selected_premium);
        let alternatives = rank_alternatives(&tier_premiums, selected_tier);

        let medicare_fit = self.medicare_fit(household);
        let cobra = self.cobra_attachment(current, &tier_premiums);
        let hsa = self.hsa_attachment(household, selected_tier);

        log::info!(
            "recommendation: {} at ${:.0}/mo (gap score {:.0})",
            selected_tier.as_str(),
            selected_premium,
            coverage_gap_score
        );

        Some(Recommendation {
            insurance_type: format!("Marketplace {}", selected_tier.as_str()),
            selected_tier,
            estimated_monthly_premium: selected_premium,
            monthly_cost_range: (
                selected_premium * COST_RANGE_LOW,
                selected_premium * COST_RANGE_HIGH,
            ),
            coverage_gap_score,
            reasoning,
            alternatives,
            medicare_fit,
            cobra,
            hsa,
        })
    }

    /// Tier selection from budget preference, utilization, and affordability
    fn select_tier(
        &self,
        household: &Household,
        tier_premiums: &[(MetalTier, HouseholdPremium)],
    ) -> MetalTier {
        let mut tier = match household.budget_preference {
            BudgetPreference::MinimizePremium => MetalTier::Bronze,
            BudgetPreference::Balanced => MetalTier::Silver,
            BudgetPreference::MinimizeTotalCost => match household.utilization {
                UtilizationLevel::Low => MetalTier::Bronze,
                UtilizationLevel::Moderate => MetalTier::Silver,
                UtilizationLevel::High => MetalTier::Gold,
            },
        };

        // Heavy expected usage justifies one step up, unless the caller
        // asked purely for the cheapest premium
        if household.budget_preference != BudgetPreference::MinimizePremium
            && (household.planned_procedure || household.utilization == UtilizationLevel::High)
        {
            tier = step_up(tier);
        }

        // Step back down while the tier is unaffordable
        let monthly_income = household.income.midpoint() / 12.0;
        while tier != MetalTier::Bronze
            && premium_for(tier_premiums, tier) > monthly_income * AFFORDABILITY_SHARE
        {
            tier = step_down(tier);
        }

        tier
    }

    fn build_reasoning(
        &self,
        household: &Household,
        tier: MetalTier,
        premium: f64,
    ) -> Vec<String> {
        let mut reasoning = vec![format!(
            "{} coverage fits a household of {} at about ${:.0}/month.",
            tier.as_str(),
            household.member_count(),
            premium
        )];

        match household.budget_preference {
            BudgetPreference::MinimizePremium => reasoning.push(
                "You prioritized the lowest premium; expect higher cost sharing when \
                 care is used."
                    .to_string(),
            ),
            BudgetPreference::Balanced => reasoning.push(
                "A mid-tier plan balances premium against cost sharing for typical \
                 utilization."
                    .to_string(),
            ),
            BudgetPreference::MinimizeTotalCost => reasoning.push(
                "Selection minimizes expected premium plus out-of-pocket at your \
                 stated utilization."
                    .to_string(),
            ),
        }

        if household.planned_procedure {
            reasoning.push(
                "A planned procedure makes richer coverage pay for itself this year."
                    .to_string(),
            );
        }
        if household.child_ages.len() > 3 {
            reasoning.push(format!(
                "Only the first three children are rated; {} additional child(ren) \
                 are covered at no extra premium.",
                household.child_ages.len() - 3
            ));
        }

        reasoning
    }

    fn medicare_fit(&self, household: &Household) -> Option<MedicareFit> {
        let eligible = household
            .adult_ages
            .iter()
            .filter(|&&age| age >= MEDICARE_AGE)
            .count();
        if eligible == 0 {
            return None;
        }
        Some(MedicareFit {
            eligible_adults: eligible,
            note: format!(
                "{} adult(s) are Medicare-eligible; compare Medicare Advantage and \
                 Medigap options before buying marketplace coverage for them.",
                eligible
            ),
        })
    }

    fn cobra_attachment(
        &self,
        current: Option<&CurrentCoverage>,
        tier_premiums: &[(MetalTier, HouseholdPremium)],
    ) -> Option<CobraAnalysis> {
        let current = current?;
        if !(current.employer_sponsored && current.coverage_ending) {
            return None;
        }

        let months = current.months_since_job_loss.unwrap_or(0);
        let alternative_range = (
            premium_for(tier_premiums, MetalTier::Bronze),
            premium_for(tier_premiums, MetalTier::Gold),
        );

        let analysis = self.audit.record(
            "cobra_analysis",
            json!({
                "current_monthly_cost": current.monthly_premium,
                "months_since_job_loss": months,
                "preexisting_conditions": current.preexisting_conditions,
                "alternative_range": alternative_range,
            }),
            || {
                self.cobra.analyze(
                    current.monthly_premium,
                    months,
                    current.preexisting_conditions,
                    alternative_range,
                )
            },
        );
        Some(analysis)
    }

    fn hsa_attachment(&self, household: &Household, tier: MetalTier) -> Option<HsaAnalysis> {
        let hsa_compatible = tier == MetalTier::Bronze
            || household.budget_preference == BudgetPreference::MinimizePremium;
        if !hsa_compatible {
            return None;
        }
        let oldest = household.oldest_adult()?;

        let analysis = self.audit.record(
            "hsa_analysis",
            json!({
                "family_size": household.member_count(),
                "age": oldest,
                "annual_income": household.income.midpoint(),
                "state_tax_rate": DEFAULT_STATE_TAX_RATE,
            }),
            || {
                self.hsa.calculate_benefits(
                    household.member_count() as u32,
                    oldest,
                    household.income.midpoint(),
                    DEFAULT_STATE_TAX_RATE,
                )
            },
        );
        Some(analysis)
    }
}

impl Default for RecommendationOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn premium_for(tier_premiums: &[(MetalTier, HouseholdPremium)], tier: MetalTier) -> f64 {
    tier_premiums
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, p)| p.total)
        .unwrap_or(0.0)
}

fn rank_alternatives(
    tier_premiums: &[(MetalTier, HouseholdPremium)],
    selected: MetalTier,
) -> Vec<RankedOption> {
    let mut others: Vec<(MetalTier, f64)> = tier_premiums
        .iter()
        .filter(|(t, _)| *t != selected)
        .map(|(t, p)| (*t, p.total))
        .collect();
    others.sort_by(|a, b| a.1.total_cmp(&b.1));

    others
        .into_iter()
        .enumerate()
        .map(|(i, (tier, premium))| RankedOption {
            rank: i + 1,
            tier,
            monthly_premium: premium,
            summary: format!("{} at ${:.0}/month", tier.as_str(), premium),
        })
        .collect()
}

fn step_up(tier: MetalTier) -> MetalTier {
    match tier {
        MetalTier::Catastrophic => MetalTier::Bronze,
        MetalTier::Bronze => MetalTier::Silver,
        MetalTier::Silver => MetalTier::Gold,
        // Gold is the ceiling for automatic upgrades
        other => other,
    }
}

fn step_down(tier: MetalTier) -> MetalTier {
    match tier {
        MetalTier::Platinum => MetalTier::Gold,
        MetalTier::Gold => MetalTier::Silver,
        MetalTier::Silver => MetalTier::Bronze,
        other => other,
    }
}

/// Coverage-gap score: how far the tier's richness falls short of the
/// household's expected needs, scaled to 0-100
fn coverage_gap(tier: MetalTier, household: &Household) -> f64 {
    let mut need = match household.utilization {
        UtilizationLevel::Low => 0.55,
        UtilizationLevel::Moderate => 0.70,
        UtilizationLevel::High => 0.85,
    };
    if household.planned_procedure {
        need += 0.05;
    }

    ((need - tier.richness()).max(0.0) * 250.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{HouseholdIncome, Residence};

    fn base_household() -> Household {
        Household::new(
            vec![Residence::primary("33101", "FL")],
            vec![40, 38],
            vec![10, 8],
            HouseholdIncome::Exact(90_000.0),
            BudgetPreference::Balanced,
        )
    }

    #[test]
    fn test_incomplete_household_declines() {
        let orchestrator = RecommendationOrchestrator::new();

        let mut no_residence = base_household();
        no_residence.residences.clear();
        assert!(orchestrator.recommend(&no_residence, None, None).is_none());

        let mut no_adults = base_household();
        no_adults.adult_ages.clear();
        assert!(orchestrator.recommend(&no_adults, None, None).is_none());

        // Nothing is logged for declined input
        assert!(orchestrator.audit().is_empty());
    }

    #[test]
    fn test_balanced_selects_silver() {
        let orchestrator = RecommendationOrchestrator::new();
        let rec = orchestrator.recommend(&base_household(), None, None).unwrap();

        assert_eq!(rec.selected_tier, MetalTier::Silver);
        assert_eq!(rec.insurance_type, "Marketplace Silver");
        assert_eq!(rec.alternatives.len(), 3);
        assert!(rec.monthly_cost_range.0 < rec.estimated_monthly_premium);
        assert!(rec.monthly_cost_range.1 > rec.estimated_monthly_premium);
    }

    #[test]
    fn test_high_utilization_steps_up() {
        let orchestrator = RecommendationOrchestrator::new();
        let mut household = base_household();
        household.utilization = UtilizationLevel::High;
        household.income = HouseholdIncome::Exact(400_000.0);

        let rec = orchestrator.recommend(&household, None, None).unwrap();
        assert_eq!(rec.selected_tier, MetalTier::Gold);
    }

    #[test]
    fn test_profile_refines_utilization() {
        use crate::household::{PrescriptionTier, RiskTolerance};

        let orchestrator = RecommendationOrchestrator::new();
        let mut household = base_household();
        household.income = HouseholdIncome::Exact(300_000.0);

        let profile = UtilizationProfile {
            primary_visits: 4,
            specialist_visits: 6,
            er_visits: 0,
            monthly_prescriptions: 1,
            prescription_tier: PrescriptionTier::Preferred,
            planned_procedure: false,
            risk_tolerance: RiskTolerance::Low,
            prefers_low_premium: false,
        };

        let without = orchestrator.recommend(&household, None, None).unwrap();
        assert_eq!(without.selected_tier, MetalTier::Silver);

        // Heavy expected specialist usage reads as high utilization
        let with = orchestrator.recommend(&household, Some(&profile), None).unwrap();
        assert_eq!(with.selected_tier, MetalTier::Gold);
    }

    #[test]
    fn test_affordability_steps_down() {
        let orchestrator = RecommendationOrchestrator::new();
        let mut household = base_household();
        // Four covered lives on a very low income cannot hold Silver
        household.income = HouseholdIncome::Exact(20_000.0);

        let rec = orchestrator.recommend(&household, None, None).unwrap();
        assert_eq!(rec.selected_tier, MetalTier::Bronze);
    }

    #[test]
    fn test_minimize_premium_attaches_hsa() {
        let orchestrator = RecommendationOrchestrator::new();
        let mut household = base_household();
        household.budget_preference = BudgetPreference::MinimizePremium;

        let rec = orchestrator.recommend(&household, None, None).unwrap();
        assert_eq!(rec.selected_tier, MetalTier::Bronze);
        assert!(rec.hsa.is_some());
        assert!(rec.cobra.is_none());
    }

    #[test]
    fn test_balanced_has_no_hsa_attachment() {
        let orchestrator = RecommendationOrchestrator::new();
        let rec = orchestrator.recommend(&base_household(), None, None).unwrap();

        assert!(rec.hsa.is_none());
    }

    #[test]
    fn test_cobra_attachment_when_employer_coverage_ending() {
        let orchestrator = RecommendationOrchestrator::new();
        let current = CurrentCoverage {
            monthly_premium: 450.0,
            employer_sponsored: true,
            coverage_ending: true,
            months_since_job_loss: Some(2),
            preexisting_conditions: false,
        };

        let rec = orchestrator
            .recommend(&base_household(), None, Some(&current))
            .unwrap();
        let cobra = rec.cobra.unwrap();
        assert_eq!(cobra.months_remaining, 16);

        // Stable employer coverage attaches nothing
        let stable = CurrentCoverage {
            coverage_ending: false,
            ..current
        };
        let rec = orchestrator
            .recommend(&base_household(), None, Some(&stable))
            .unwrap();
        assert!(rec.cobra.is_none());
    }

    #[test]
    fn test_medicare_fit_at_65() {
        let orchestrator = RecommendationOrchestrator::new();
        let mut household = base_household();
        household.adult_ages = vec![66, 58];

        let rec = orchestrator.recommend(&household, None, None).unwrap();
        let fit = rec.medicare_fit.unwrap();
        assert_eq!(fit.eligible_adults, 1);
    }

    #[test]
    fn test_every_run_is_audited() {
        let orchestrator = RecommendationOrchestrator::new();
        orchestrator.recommend(&base_household(), None, None).unwrap();

        let stats = orchestrator.audit().stats();
        assert_eq!(stats.by_type["household_tier_pricing"], 1);
        assert_eq!(stats.by_type["coverage_gap_score"], 1);

        // A second identical run re-computes and re-logs with the same hash
        orchestrator.recommend(&base_household(), None, None).unwrap();
        let stats = orchestrator.audit().stats();
        assert_eq!(stats.by_type["household_tier_pricing"], 2);
        assert_eq!(stats.distinct_inputs, 2);
    }

    #[test]
    fn test_alternatives_ranked_by_premium() {
        let orchestrator = RecommendationOrchestrator::new();
        let rec = orchestrator.recommend(&base_household(), None, None).unwrap();

        for pair in rec.alternatives.windows(2) {
            assert!(pair[0].monthly_premium <= pair[1].monthly_premium);
        }
        assert_eq!(rec.alternatives[0].rank, 1);
    }

    #[test]
    fn test_coverage_gap_scoring() {
        let mut household = base_household();
        household.utilization = UtilizationLevel::High;

        // Bronze leaves a high-utilization household most exposed
        let bronze_gap = coverage_gap(MetalTier::Bronze, &household);
        let gold_gap = coverage_gap(MetalTier::Gold, &household);
        assert!(bronze_gap > gold_gap);
        assert!((0.0..=100.0).contains(&bronze_gap));

        household.utilization = UtilizationLevel::Low;
        assert_eq!(coverage_gap(MetalTier::Gold, &household), 0.0);
    }
}
