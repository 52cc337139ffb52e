//! Household and plan data structures matching the intake format

use serde::{Deserialize, Serialize};

/// A single residence on the household record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    /// Five-digit ZIP code (validated upstream)
    pub zip: String,

    /// Two-letter state code
    pub state: String,

    /// Whether this is the primary residence for rating purposes
    pub is_primary: bool,

    /// Months per year occupied (1-12, for split-state households)
    pub months_occupied: u8,
}

impl Residence {
    /// Create a primary residence occupied year-round
    pub fn primary(zip: &str, state: &str) -> Self {
        Self {
            zip: zip.to_string(),
            state: state.to_string(),
            is_primary: true,
            months_occupied: 12,
        }
    }
}

/// Household income as reported on intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdIncome {
    /// Exact annual income in dollars
    Exact(f64),
    /// Coarse income band when exact income is not provided
    Band(IncomeBand),
}

impl HouseholdIncome {
    /// Resolve to a dollar figure (band midpoint for coarse reporting)
    pub fn midpoint(&self) -> f64 {
        match self {
            HouseholdIncome::Exact(amount) => *amount,
            HouseholdIncome::Band(band) => band.midpoint(),
        }
    }
}

/// Coarse annual income bands used when exact income is withheld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBand {
    /// [0, 30000)
    Under30k,
    /// [30000, 60000)
    From30kTo60k,
    /// [60000, 100000)
    From60kTo100k,
    /// [100000, 150000)
    From100kTo150k,
    /// [150000, Inf)
    Over150k,
}

impl IncomeBand {
    /// Determine band from an exact amount
    pub fn from_amount(amount: f64) -> Self {
        if amount < 30_000.0 {
            IncomeBand::Under30k
        } else if amount < 60_000.0 {
            IncomeBand::From30kTo60k
        } else if amount < 100_000.0 {
            IncomeBand::From60kTo100k
        } else if amount < 150_000.0 {
            IncomeBand::From100kTo150k
        } else {
            IncomeBand::Over150k
        }
    }

    /// Midpoint dollar figure used for affordability math
    pub fn midpoint(&self) -> f64 {
        match self {
            IncomeBand::Under30k => 15_000.0,
            IncomeBand::From30kTo60k => 45_000.0,
            IncomeBand::From60kTo100k => 80_000.0,
            IncomeBand::From100kTo150k => 125_000.0,
            IncomeBand::Over150k => 200_000.0,
        }
    }
}

/// Stated budget preference on intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPreference {
    /// Lowest monthly premium, accepts higher cost sharing
    MinimizePremium,
    /// Balance premium against expected out-of-pocket
    Balanced,
    /// Lowest expected total annual cost
    MinimizeTotalCost,
}

/// Coarse expected-utilization level, used for scenario overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationLevel {
    Low,
    Moderate,
    High,
}

/// A household as submitted for recommendation
///
/// Invariants (validated upstream, gated by `is_complete`):
/// - at least one residence
/// - `adult_ages` is non-empty and aligned with `tobacco_use` where supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Ordered residences; the first primary entry drives rating
    pub residences: Vec<Residence>,

    /// Ages of covered adults (18+)
    pub adult_ages: Vec<u8>,

    /// Ages of covered children (0-17), in caller order
    pub child_ages: Vec<u8>,

    /// Tobacco-use flags aligned to `adult_ages` by index.
    /// Missing or short lists default the remainder to non-users.
    #[serde(default)]
    pub tobacco_use: Vec<bool>,

    /// Reported income
    pub income: HouseholdIncome,

    /// Stated budget preference
    pub budget_preference: BudgetPreference,

    /// Expected utilization level (scenario-override knob)
    #[serde(default = "default_utilization")]
    pub utilization: UtilizationLevel,

    /// Whether employer-sponsored coverage is available (scenario-override knob)
    #[serde(default)]
    pub has_employer_coverage: bool,

    /// Whether a procedure is already planned this year (scenario-override knob)
    #[serde(default)]
    pub planned_procedure: bool,
}

fn default_utilization() -> UtilizationLevel {
    UtilizationLevel::Moderate
}

impl Household {
    /// Create a household with the required rating fields
    pub fn new(
        residences: Vec<Residence>,
        adult_ages: Vec<u8>,
        child_ages: Vec<u8>,
        income: HouseholdIncome,
        budget_preference: BudgetPreference,
    ) -> Self {
        Self {
            residences,
            adult_ages,
            child_ages,
            tobacco_use: Vec::new(),
            income,
            budget_preference,
            utilization: UtilizationLevel::Moderate,
            has_employer_coverage: false,
            planned_procedure: false,
        }
    }

    /// State code of the primary residence (first flagged primary, else first listed)
    pub fn primary_state(&self) -> Option<&str> {
        self.residences
            .iter()
            .find(|r| r.is_primary)
            .or_else(|| self.residences.first())
            .map(|r| r.state.as_str())
    }

    /// Whether the record carries enough to produce a recommendation
    pub fn is_complete(&self) -> bool {
        !self.residences.is_empty() && !self.adult_ages.is_empty()
    }

    /// Total covered lives
    pub fn member_count(&self) -> usize {
        self.adult_ages.len() + self.child_ages.len()
    }

    /// Tobacco flag for the adult at `index`, defaulting to non-user
    pub fn tobacco_flag(&self, index: usize) -> bool {
        self.tobacco_use.get(index).copied().unwrap_or(false)
    }

    /// Age of the oldest covered adult
    pub fn oldest_adult(&self) -> Option<u8> {
        self.adult_ages.iter().copied().max()
    }
}

/// ACA metal tier of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Catastrophic,
}

impl MetalTier {
    /// Premium multiplier relative to Silver.
    /// Catastrophic sits below Bronze and outside the ordered four-tier sweep.
    pub fn multiplier(&self) -> f64 {
        match self {
            MetalTier::Catastrophic => 0.57,
            MetalTier::Bronze => 0.75,
            MetalTier::Silver => 1.00,
            MetalTier::Gold => 1.30,
            MetalTier::Platinum => 1.55,
        }
    }

    /// The four ordered tiers used for pricing sweeps
    pub fn ordered() -> [MetalTier; 4] {
        [
            MetalTier::Bronze,
            MetalTier::Silver,
            MetalTier::Gold,
            MetalTier::Platinum,
        ]
    }

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalTier::Bronze => "Bronze",
            MetalTier::Silver => "Silver",
            MetalTier::Gold => "Gold",
            MetalTier::Platinum => "Platinum",
            MetalTier::Catastrophic => "Catastrophic",
        }
    }

    /// Actuarial-value style richness score used for coverage-gap scoring
    pub fn richness(&self) -> f64 {
        match self {
            MetalTier::Catastrophic => 0.50,
            MetalTier::Bronze => 0.60,
            MetalTier::Silver => 0.70,
            MetalTier::Gold => 0.80,
            MetalTier::Platinum => 0.90,
        }
    }
}

/// Plan network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkType {
    Hmo,
    Ppo,
    Epo,
    Pos,
    Hdhp,
}

impl NetworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Hmo => "HMO",
            NetworkType::Ppo => "PPO",
            NetworkType::Epo => "EPO",
            NetworkType::Pos => "POS",
            NetworkType::Hdhp => "HDHP",
        }
    }
}

/// Per-service copays on a plan offer, in dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Copays {
    pub primary: f64,
    pub specialist: f64,
    pub er: f64,
    pub generic_rx: f64,
}

impl Default for Copays {
    fn default() -> Self {
        Self {
            primary: 30.0,
            specialist: 60.0,
            er: 350.0,
            generic_rx: 15.0,
        }
    }
}

/// A concrete plan offer to compare or recommend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOffer {
    /// Marketplace plan identifier
    pub id: String,

    /// Issuing carrier name
    pub issuer: String,

    /// Metal tier
    pub metal_tier: MetalTier,

    /// Network type
    pub network: NetworkType,

    /// Monthly premium in dollars (non-negative)
    pub monthly_premium: f64,

    /// Annual deductible in dollars (non-negative)
    pub deductible: f64,

    /// Annual out-of-pocket maximum in dollars (non-negative)
    pub oop_max: f64,

    /// Per-service copays
    #[serde(default)]
    pub copays: Copays,

    /// Coinsurance fraction above the deductible (0.0-1.0)
    pub coinsurance: f64,

    /// Whether the plan pairs with an HSA
    #[serde(default)]
    pub hsa_eligible: bool,

    /// Star quality rating, 1-5
    pub quality_rating: u8,
}

impl PlanOffer {
    /// Annual premium cost
    pub fn annual_premium(&self) -> f64 {
        self.monthly_premium * 12.0
    }
}

/// Prescription formulary tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionTier {
    Generic,
    Preferred,
    Specialty,
}

/// Self-reported risk tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Expected annual utilization supplied alongside a comparison request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationProfile {
    /// Expected primary-care visits per year
    pub primary_visits: u32,

    /// Expected specialist visits per year
    pub specialist_visits: u32,

    /// Expected ER visits per year
    pub er_visits: u32,

    /// Ongoing monthly prescription count
    pub monthly_prescriptions: u32,

    /// Formulary tier of the dominant prescription
    #[serde(default = "default_rx_tier")]
    pub prescription_tier: PrescriptionTier,

    /// Whether a procedure is planned this year
    #[serde(default)]
    pub planned_procedure: bool,

    /// Self-reported risk tolerance
    pub risk_tolerance: RiskTolerance,

    /// Prefers low premium over low out-of-pocket exposure
    #[serde(default)]
    pub prefers_low_premium: bool,
}

fn default_rx_tier() -> PrescriptionTier {
    PrescriptionTier::Generic
}

/// Snapshot of coverage the household currently holds, supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCoverage {
    /// Current (possibly employer-subsidized) monthly premium
    pub monthly_premium: f64,

    /// Whether the coverage is employer-sponsored
    pub employer_sponsored: bool,

    /// Whether the coverage is ending (job loss, aging out)
    #[serde(default)]
    pub coverage_ending: bool,

    /// Months since job loss, when coverage ended with employment
    #[serde(default)]
    pub months_since_job_loss: Option<u32>,

    /// Whether anyone on the policy has a pre-existing condition in active treatment
    #[serde(default)]
    pub preexisting_conditions: bool,
}
