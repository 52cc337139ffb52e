//! Side-by-side comparison report for two plan offers
//!
//! Usage: cargo run --bin compare_plans [plans.json]
//!
//! With a path argument, reads a JSON array of two PlanOffer records;
//! otherwise compares a built-in bronze/gold example pair.

use anyhow::{bail, Context, Result};
use std::fs::File;

use plan_advisor::comparison::MetricWinner;
use plan_advisor::household::{Copays, NetworkType, PlanOffer};
use plan_advisor::{MetalTier, PlanComparisonEngine};

fn main() -> Result<()> {
    env_logger::init();

    let plans = match std::env::args().nth(1) {
        Some(path) => load_plans(&path)?,
        None => example_plans(),
    };
    let [plan_a, plan_b] = plans;

    println!("Comparing plans");
    println!("{}", "=".repeat(60));
    println!("  A: {} {} ({})", plan_a.issuer, plan_a.id, plan_a.metal_tier.as_str());
    println!("  B: {} {} ({})", plan_b.issuer, plan_b.id, plan_b.metal_tier.as_str());
    println!();

    let engine = PlanComparisonEngine::new();
    let result = engine.compare(&plan_a, &plan_b, None);

    println!("{:<24} {:>12} {:>12} {:>4} {:>8}", "Metric", "Plan A", "Plan B", "Wt", "Winner");
    println!("{}", "-".repeat(64));
    for metric in &result.metrics {
        println!(
            "{:<24} {:>12.2} {:>12.2} {:>4} {:>8}",
            metric.name,
            metric.value_a,
            metric.value_b,
            metric.weight,
            winner_label(metric.winner),
        );
    }

    println!("\n{:<22} {:>14} {:>14} {:>8}", "Scenario", "Plan A total", "Plan B total", "Cheaper");
    println!("{}", "-".repeat(62));
    for outcome in &result.scenarios {
        println!(
            "{:<22} {:>14.2} {:>14.2} {:>8}",
            outcome.scenario.name,
            outcome.plan_a.total,
            outcome.plan_b.total,
            winner_label(outcome.cheaper),
        );
    }

    println!(
        "\nOverall winner: {} ({:?} confidence)",
        winner_label(result.overall_winner),
        result.confidence
    );
    for reason in &result.reasons {
        println!("  - {}", reason);
    }
    if !result.key_differences.is_empty() {
        println!("\nKey differences:");
        for diff in &result.key_differences {
            println!("  * {}", diff);
        }
    }
    for caveat in &result.caveats {
        println!("  (caveat) {}", caveat);
    }

    Ok(())
}

fn winner_label(winner: MetricWinner) -> &'static str {
    match winner {
        MetricWinner::PlanA => "A",
        MetricWinner::PlanB => "B",
        MetricWinner::Tie => "tie",
    }
}

fn load_plans(path: &str) -> Result<[PlanOffer; 2]> {
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    let plans: Vec<PlanOffer> = serde_json::from_reader(file)?;
    match <[PlanOffer; 2]>::try_from(plans) {
        Ok(pair) => Ok(pair),
        Err(plans) => bail!("expected exactly 2 plans, got {}", plans.len()),
    }
}

fn example_plans() -> [PlanOffer; 2] {
    [
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
        },
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
        },
    ]
}
