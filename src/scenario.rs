//! Scenario creation and comparison
//!
//! A scenario is a named household variant. The comparator applies partial
//! overrides onto a base household, derives a standard family of what-if
//! alternatives, and diffs two scenarios by running the full
//! recommendation for each side. Diffs are tagged field-level records, so
//! new household fields extend the diff without touching call sites.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::household::{
    BudgetPreference, Household, HouseholdIncome, Residence, UtilizationLevel,
};
use crate::orchestrator::RecommendationOrchestrator;

/// A named household variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub household: Household,
}

/// Partial overrides applied onto a base household
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdOverrides {
    #[serde(default)]
    pub residences: Option<Vec<Residence>>,
    #[serde(default)]
    pub adult_ages: Option<Vec<u8>>,
    #[serde(default)]
    pub child_ages: Option<Vec<u8>>,
    #[serde(default)]
    pub tobacco_use: Option<Vec<bool>>,
    #[serde(default)]
    pub income: Option<HouseholdIncome>,
    #[serde(default)]
    pub budget_preference: Option<BudgetPreference>,
    #[serde(default)]
    pub utilization: Option<UtilizationLevel>,
    #[serde(default)]
    pub has_employer_coverage: Option<bool>,
    #[serde(default)]
    pub planned_procedure: Option<bool>,
}

impl HouseholdOverrides {
    /// Apply the overrides onto a base household, leaving unset fields alone
    pub fn apply(&self, base: &Household) -> Household {
        let mut household = base.clone();

        if let Some(residences) = &self.residences {
            household.residences = residences.clone();
        }
        if let Some(adult_ages) = &self.adult_ages {
            household.adult_ages = adult_ages.clone();
        }
        if let Some(child_ages) = &self.child_ages {
            household.child_ages = child_ages.clone();
        }
        if let Some(tobacco_use) = &self.tobacco_use {
            household.tobacco_use = tobacco_use.clone();
        }
        if let Some(income) = &self.income {
            household.income = income.clone();
        }
        if let Some(budget_preference) = self.budget_preference {
            household.budget_preference = budget_preference;
        }
        if let Some(utilization) = self.utilization {
            household.utilization = utilization;
        }
        if let Some(has_employer_coverage) = self.has_employer_coverage {
            household.has_employer_coverage = has_employer_coverage;
        }
        if let Some(planned_procedure) = self.planned_procedure {
            household.planned_procedure = planned_procedure;
        }

        household
    }
}

/// Direction of a field-level change between two scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Increase,
    Decrease,
    Change,
}

/// One differing household field between two scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub value_a: Value,
    pub value_b: Value,
    pub change_type: ChangeType,
}

/// Which scenario is cheaper overall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheaperScenario {
    #[serde(rename = "scenario1")]
    First,
    #[serde(rename = "scenario2")]
    Second,
    #[serde(rename = "equal")]
    Equal,
}

/// Premium cost comparison between two scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    /// Average recommended monthly premium under each scenario
    pub avg_monthly_premium_1: f64,
    pub avg_monthly_premium_2: f64,

    /// Premium delta (scenario 2 minus scenario 1)
    pub monthly_delta: f64,

    pub cheaper_scenario: CheaperScenario,

    /// Annualized savings from choosing the cheaper scenario
    pub annual_savings: f64,
}

/// Coverage-risk comparison between two scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskComparison {
    pub coverage_gap_score_1: f64,
    pub coverage_gap_score_2: f64,

    /// Gap delta (scenario 2 minus scenario 1); negative means scenario 2
    /// leaves less exposure
    pub gap_delta: f64,
}

/// Full report from comparing two scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Only the household fields that actually differ
    pub differences: Vec<FieldDiff>,

    pub cost: CostComparison,
    pub risk: RiskComparison,

    pub insights: Vec<String>,
    pub recommendation: String,
}

/// Baseline plus derived what-if scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub baseline: Scenario,
    pub alternatives: Vec<Scenario>,
}

/// Scenario comparator over a pre-built orchestrator
#[derive(Debug, Default)]
pub struct ScenarioComparator {
    orchestrator: RecommendationOrchestrator,
}

impl ScenarioComparator {
    /// Create a comparator over default rating tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a comparator over a pre-built orchestrator
    pub fn with_orchestrator(orchestrator: RecommendationOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// The orchestrator (and its audit log) backing this comparator
    pub fn orchestrator(&self) -> &RecommendationOrchestrator {
        &self.orchestrator
    }

    /// Build a scenario by applying partial overrides onto a base household
    pub fn create_scenario(
        &self,
        id: &str,
        name: &str,
        description: &str,
        base: &Household,
        overrides: Option<&HouseholdOverrides>,
    ) -> Scenario {
        let household = match overrides {
            Some(overrides) => overrides.apply(base),
            None => base.clone(),
        };
        Scenario {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            household,
        }
    }

    /// Derive the standard what-if family for a base household:
    /// higher utilization, adding employer coverage (only if absent), and
    /// a planned-procedure variant (only if not already planned)
    pub fn generate_common_scenarios(&self, base: &Household) -> ScenarioSet {
        let baseline = self.create_scenario(
            "baseline",
            "Current Situation",
            "Your household as entered",
            base,
            None,
        );

        let mut alternatives = Vec::new();

        let higher = HouseholdOverrides {
            utilization: Some(bump_utilization(base.utilization)),
            ..Default::default()
        };
        alternatives.push(self.create_scenario(
            "higher-utilization",
            "Higher Utilization",
            "Same household with more medical usage than expected",
            base,
            Some(&higher),
        ));

        if !base.has_employer_coverage {
            let employer = HouseholdOverrides {
                has_employer_coverage: Some(true),
                ..Default::default()
            };
            alternatives.push(self.create_scenario(
                "employer-coverage",
                "Employer Coverage Available",
                "Same household with an employer plan on the table",
                base,
                Some(&employer),
            ));
        }

        if !base.planned_procedure {
            let procedure = HouseholdOverrides {
                planned_procedure: Some(true),
                ..Default::default()
            };
            alternatives.push(self.create_scenario(
                "planned-procedure",
                "Planned Procedure",
                "Same household with a procedure scheduled this year",
                base,
                Some(&procedure),
            ));
        }

        ScenarioSet {
            baseline,
            alternatives,
        }
    }

    /// Compare two scenarios by running the full recommendation for each
    pub fn compare_scenarios(&self, s1: &Scenario, s2: &Scenario) -> ScenarioComparison {
        self.orchestrator.audit().record(
            "scenario_comparison",
            json!({"scenario_1": s1.id, "scenario_2": s2.id}),
            || self.compare_scenarios_inner(s1, s2),
        )
    }

    fn compare_scenarios_inner(&self, s1: &Scenario, s2: &Scenario) -> ScenarioComparison {
        let rec_1 = self.orchestrator.recommend(&s1.household, None, None);
        let rec_2 = self.orchestrator.recommend(&s2.household, None, None);

        let (premium_1, gap_1) = rec_1
            .as_ref()
            .map(|r| (r.estimated_monthly_premium, r.coverage_gap_score))
            .unwrap_or((0.0, 100.0));
        let (premium_2, gap_2) = rec_2
            .as_ref()
            .map(|r| (r.estimated_monthly_premium, r.coverage_gap_score))
            .unwrap_or((0.0, 100.0));

        let differences = diff_households(&s1.household, &s2.household);

        let monthly_delta = premium_2 - premium_1;
        let cheaper_scenario = if monthly_delta > 0.0 {
            CheaperScenario::First
        } else if monthly_delta < 0.0 {
            CheaperScenario::Second
        } else {
            CheaperScenario::Equal
        };
        let cost = CostComparison {
            avg_monthly_premium_1: premium_1,
            avg_monthly_premium_2: premium_2,
            monthly_delta,
            cheaper_scenario,
            annual_savings: monthly_delta.abs() * 12.0,
        };

        let risk = RiskComparison {
            coverage_gap_score_1: gap_1,
            coverage_gap_score_2: gap_2,
            gap_delta: gap_2 - gap_1,
        };

        let mut insights = Vec::new();
        if rec_1.is_none() || rec_2.is_none() {
            insights.push(
                "One side of this comparison lacked the required household fields; \
                 its costs read as zero."
                    .to_string(),
            );
        }
        match cheaper_scenario {
            CheaperScenario::Equal => insights.push(format!(
                "Both scenarios price identically under \"{}\" and \"{}\".",
                s1.name, s2.name
            )),
            CheaperScenario::First => insights.push(format!(
                "\"{}\" runs ${:.0}/month cheaper (${:.0}/year).",
                s1.name,
                monthly_delta.abs(),
                cost.annual_savings
            )),
            CheaperScenario::Second => insights.push(format!(
                "\"{}\" runs ${:.0}/month cheaper (${:.0}/year).",
                s2.name,
                monthly_delta.abs(),
                cost.annual_savings
            )),
        }
        if risk.gap_delta.abs() > f64::EPSILON {
            let (wider, narrower) = if risk.gap_delta > 0.0 {
                (&s2.name, &s1.name)
            } else {
                (&s1.name, &s2.name)
            };
            insights.push(format!(
                "\"{}\" leaves a wider coverage gap than \"{}\"; cheaper premiums \
                 there trade against exposure.",
                wider, narrower
            ));
        }
        if differences.iter().any(|d| d.field == "has_employer_coverage") {
            insights.push(
                "Employer coverage availability changes between scenarios; an \
                 employer contribution usually beats full-price marketplace premiums."
                    .to_string(),
            );
        }

        let recommendation = match cheaper_scenario {
            CheaperScenario::Equal => {
                "The scenarios are financially equivalent; decide on non-cost factors."
                    .to_string()
            }
            CheaperScenario::First => format!(
                "Prefer \"{}\" unless the differences listed justify ${:.0}/year.",
                s1.name, cost.annual_savings
            ),
            CheaperScenario::Second => format!(
                "Prefer \"{}\" unless the differences listed justify ${:.0}/year.",
                s2.name, cost.annual_savings
            ),
        };

        ScenarioComparison {
            differences,
            cost,
            risk,
            insights,
            recommendation,
        }
    }
}

fn bump_utilization(level: UtilizationLevel) -> UtilizationLevel {
    match level {
        UtilizationLevel::Low => UtilizationLevel::Moderate,
        UtilizationLevel::Moderate | UtilizationLevel::High => UtilizationLevel::High,
    }
}

/// Field-level diff of two households over their serialized top-level fields
fn diff_households(a: &Household, b: &Household) -> Vec<FieldDiff> {
    let value_a = serde_json::to_value(a).unwrap_or(Value::Null);
    let value_b = serde_json::to_value(b).unwrap_or(Value::Null);

    let (Value::Object(map_a), Value::Object(map_b)) = (&value_a, &value_b) else {
        return Vec::new();
    };

    let mut fields: Vec<&String> = map_a.keys().chain(map_b.keys()).collect();
    fields.sort();
    fields.dedup();

    let mut diffs = Vec::new();
    for field in fields {
        let left = map_a.get(field).cloned().unwrap_or(Value::Null);
        let right = map_b.get(field).cloned().unwrap_or(Value::Null);
        if left == right {
            continue;
        }

        let change_type = match (left.as_f64(), right.as_f64()) {
            (Some(x), Some(y)) if y > x => ChangeType::Increase,
            (Some(x), Some(y)) if y < x => ChangeType::Decrease,
            _ => ChangeType::Change,
        };

        diffs.push(FieldDiff {
            field: field.clone(),
            value_a: left,
            value_b: right,
            change_type,
        });
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_household() -> Household {
        Household::new(
            vec![Residence::primary("33101", "FL")],
            vec![40, 38],
            vec![10],
            HouseholdIncome::Exact(90_000.0),
            BudgetPreference::Balanced,
        )
    }

    #[test]
    fn test_create_scenario_applies_overrides() {
        let comparator = ScenarioComparator::new();
        let base = base_household();

        let overrides = HouseholdOverrides {
            utilization: Some(UtilizationLevel::High),
            planned_procedure: Some(true),
            ..Default::default()
        };
        let scenario =
            comparator.create_scenario("s1", "Surgery Year", "knee surgery", &base, Some(&overrides));

        assert_eq!(scenario.household.utilization, UtilizationLevel::High);
        assert!(scenario.household.planned_procedure);
        // Untouched fields carry through
        assert_eq!(scenario.household.adult_ages, base.adult_ages);
        assert_eq!(scenario.household.income, base.income);
    }

    #[test]
    fn test_generate_common_scenarios_full_family() {
        let comparator = ScenarioComparator::new();
        let set = comparator.generate_common_scenarios(&base_household());

        let ids: Vec<&str> = set.alternatives.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["higher-utilization", "employer-coverage", "planned-procedure"]
        );
        assert_eq!(
            set.alternatives[0].household.utilization,
            UtilizationLevel::High
        );
    }

    #[test]
    fn test_generate_common_scenarios_conditional_variants() {
        let comparator = ScenarioComparator::new();

        let mut base = base_household();
        base.has_employer_coverage = true;
        base.planned_procedure = true;

        let set = comparator.generate_common_scenarios(&base);
        let ids: Vec<&str> = set.alternatives.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["higher-utilization"]);
    }

    #[test]
    fn test_identical_scenarios_compare_equal() {
        let comparator = ScenarioComparator::new();
        let base = base_household();

        let s1 = comparator.create_scenario("a", "A", "", &base, None);
        let s2 = comparator.create_scenario("b", "B", "", &base, None);
        let report = comparator.compare_scenarios(&s1, &s2);

        assert!(report.differences.is_empty());
        assert_eq!(report.cost.cheaper_scenario, CheaperScenario::Equal);
        assert_eq!(report.cost.monthly_delta, 0.0);
        assert_eq!(report.risk.gap_delta, 0.0);
    }

    #[test]
    fn test_cheaper_scenario_serializes_as_equal() {
        let value = serde_json::to_value(CheaperScenario::Equal).unwrap();
        assert_eq!(value, serde_json::json!("equal"));
        assert_eq!(
            serde_json::to_value(CheaperScenario::First).unwrap(),
            serde_json::json!("scenario1")
        );
    }

    #[test]
    fn test_diff_lists_only_changed_fields() {
        let base = base_household();

        let mut other = base.clone();
        other.income = HouseholdIncome::Exact(120_000.0);
        other.planned_procedure = true;
        other.adult_ages = vec![40, 38, 67];

        let diffs = diff_households(&base, &other);
        let fields: Vec<&str> = diffs.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["adult_ages", "income", "planned_procedure"]);

        // Structured fields tag as generic changes
        for diff in &diffs {
            assert_eq!(diff.change_type, ChangeType::Change);
        }
    }

    #[test]
    fn test_scenario_cost_direction() {
        let comparator = ScenarioComparator::new();
        let base = base_household();

        // Tobacco use raises the second scenario's premium
        let smoking = HouseholdOverrides {
            tobacco_use: Some(vec![true, true]),
            ..Default::default()
        };
        let s1 = comparator.create_scenario("a", "Non-smoking", "", &base, None);
        let s2 = comparator.create_scenario("b", "Smoking", "", &base, Some(&smoking));
        let report = comparator.compare_scenarios(&s1, &s2);

        assert_eq!(report.cost.cheaper_scenario, CheaperScenario::First);
        assert!(report.cost.monthly_delta > 0.0);
        assert!(report.cost.annual_savings > 0.0);
        assert!(!report.differences.is_empty());
    }

    #[test]
    fn test_comparison_is_audited() {
        let comparator = ScenarioComparator::new();
        let base = base_household();

        let s1 = comparator.create_scenario("a", "A", "", &base, None);
        let s2 = comparator.create_scenario("b", "B", "", &base, None);
        comparator.compare_scenarios(&s1, &s2);

        let stats = comparator.orchestrator().audit().stats();
        assert_eq!(stats.by_type["scenario_comparison"], 1);
        // The two inner recommendations logged their pricing too
        assert_eq!(stats.by_type["household_tier_pricing"], 2);
    }
}
