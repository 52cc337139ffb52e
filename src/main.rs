//! Plan Advisor CLI
//!
//! Prices a household across metal tiers and prints the recommendation

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use plan_advisor::household::{
    BudgetPreference, Household, HouseholdIncome, Residence, UtilizationLevel,
};
use plan_advisor::{RatingTables, RecommendationOrchestrator};

#[derive(Parser, Debug)]
#[command(name = "plan_advisor", about = "Health plan pricing and recommendation")]
struct Args {
    /// Two-letter state code of the primary residence
    #[arg(long, default_value = "FL")]
    state: String,

    /// ZIP code of the primary residence
    #[arg(long, default_value = "33101")]
    zip: String,

    /// Adult ages, comma separated
    #[arg(long, value_delimiter = ',', default_value = "40,38")]
    adult_ages: Vec<u8>,

    /// Child ages, comma separated
    #[arg(long, value_delimiter = ',')]
    child_ages: Vec<u8>,

    /// Tobacco flags per adult, comma separated (true/false)
    #[arg(long, value_delimiter = ',')]
    tobacco: Vec<bool>,

    /// Exact annual household income in dollars
    #[arg(long, default_value_t = 85_000.0)]
    income: f64,

    /// Budget preference: premium, balanced, or total
    #[arg(long, default_value = "balanced")]
    preference: String,

    /// Expected utilization: low, moderate, or high
    #[arg(long, default_value = "moderate")]
    utilization: String,

    /// Optional rating-tables directory (CSV); embedded defaults otherwise
    #[arg(long)]
    tables: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Plan Advisor v0.1.0");
    println!("===================\n");

    let tables = match &args.tables {
        Some(path) => RatingTables::from_csv_path(path)?,
        None => RatingTables::default_rating(),
    };

    let mut household = Household::new(
        vec![Residence::primary(&args.zip, &args.state)],
        args.adult_ages.clone(),
        args.child_ages.clone(),
        HouseholdIncome::Exact(args.income),
        parse_preference(&args.preference),
    );
    household.tobacco_use = args.tobacco.clone();
    household.utilization = parse_utilization(&args.utilization);

    println!("Household: {} adult(s), {} child(ren) in {}", household.adult_ages.len(),
        household.child_ages.len(), args.state);
    println!("  Adult ages: {:?}", household.adult_ages);
    println!("  Income: ${:.0}/year", args.income);
    println!();

    let orchestrator = RecommendationOrchestrator::with_tables(tables);

    // Tier sweep table
    let calc = orchestrator.calculator();
    println!("{:<14} {:>12} {:>12}", "Tier", "Monthly", "Annual");
    println!("{}", "-".repeat(40));
    for tier in plan_advisor::MetalTier::ordered() {
        let premium = calc.price_household(&household, tier);
        println!(
            "{:<14} {:>12.2} {:>12.2}",
            tier.as_str(),
            premium.total,
            premium.total * 12.0
        );
    }
    println!();

    let Some(recommendation) = orchestrator.recommend(&household, None, None) else {
        println!("Insufficient household input; no recommendation produced.");
        return Ok(());
    };

    println!("Recommendation: {}", recommendation.insurance_type);
    println!(
        "  Estimated premium: ${:.2}/month (range ${:.0}-${:.0})",
        recommendation.estimated_monthly_premium,
        recommendation.monthly_cost_range.0,
        recommendation.monthly_cost_range.1
    );
    println!("  Coverage gap score: {:.0}/100", recommendation.coverage_gap_score);
    for line in &recommendation.reasoning {
        println!("  - {}", line);
    }

    println!("\nAlternatives:");
    for option in &recommendation.alternatives {
        println!("  {}. {}", option.rank, option.summary);
    }

    if let Some(fit) = &recommendation.medicare_fit {
        println!("\nMedicare: {}", fit.note);
    }
    if let Some(hsa) = &recommendation.hsa {
        println!(
            "\nHSA: contribute up to ${:.0}/year for ${:.0} in annual tax savings",
            hsa.contribution_limit, hsa.tax_savings.total
        );
    }

    let stats = orchestrator.audit().stats();
    println!(
        "\nAudit: {} calculation(s) recorded, {} distinct input(s)",
        stats.total_entries, stats.distinct_inputs
    );

    Ok(())
}

fn parse_preference(value: &str) -> BudgetPreference {
    match value.to_ascii_lowercase().as_str() {
        "premium" => BudgetPreference::MinimizePremium,
        "total" => BudgetPreference::MinimizeTotalCost,
        _ => BudgetPreference::Balanced,
    }
}

fn parse_utilization(value: &str) -> UtilizationLevel {
    match value.to_ascii_lowercase().as_str() {
        "low" => UtilizationLevel::Low,
        "high" => UtilizationLevel::High,
        _ => UtilizationLevel::Moderate,
    }
}
