//! Price a demographic block of households in parallel
//!
//! Sweeps a grid of adult ages and states, prices every cell across the
//! four metal tiers, and writes the block to CSV with summary statistics.

use plan_advisor::household::MetalTier;
use plan_advisor::pricing::household_premium;
use plan_advisor::PremiumCalculator;
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

/// One priced cell of the demographic grid
#[derive(Debug, Clone)]
struct BlockRow {
    state: &'static str,
    adult_age: u8,
    children: usize,
    bronze: f64,
    silver: f64,
    gold: f64,
    platinum: f64,
}

const STATES: &[&str] = &["FL", "TX", "CA", "NY", "OH", "CO", "WY"];
const CHILD_COUNTS: &[usize] = &[0, 2, 4];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = Instant::now();
    let calc = PremiumCalculator::default();

    // Grid: every state x adult age 21-64 x child count
    let cells: Vec<(&'static str, u8, usize)> = STATES
        .iter()
        .flat_map(|&state| {
            (21..=64u8).flat_map(move |age| {
                CHILD_COUNTS.iter().map(move |&children| (state, age, children))
            })
        })
        .collect();

    println!("Pricing {} household cells...", cells.len());

    let rows: Vec<BlockRow> = cells
        .par_iter()
        .map(|&(state, adult_age, children)| {
            let base_rate = calc.tables().geography.base_rate(state);
            let child_ages: Vec<u8> = (0..children).map(|i| (4 + 3 * i) as u8).collect();

            let mut premiums = [0.0f64; 4];
            for (i, tier) in MetalTier::ordered().into_iter().enumerate() {
                premiums[i] = household_premium(
                    &calc,
                    base_rate,
                    &[adult_age],
                    &child_ages,
                    state,
                    tier,
                    None,
                )
                .total;
            }

            BlockRow {
                state,
                adult_age,
                children,
                bronze: premiums[0],
                silver: premiums[1],
                gold: premiums[2],
                platinum: premiums[3],
            }
        })
        .collect();

    println!("Priced block in {:?}", start.elapsed());

    // Write output
    let output_path = "block_rates.csv";
    let mut file = File::create(output_path)?;
    writeln!(file, "State,AdultAge,Children,Bronze,Silver,Gold,Platinum")?;
    for row in &rows {
        writeln!(
            file,
            "{},{},{},{:.2},{:.2},{:.2},{:.2}",
            row.state, row.adult_age, row.children, row.bronze, row.silver, row.gold, row.platinum,
        )?;
    }
    println!("Output written to {}", output_path);

    // Summary stats per state at the silver tier
    println!("\nSilver tier summary (single adult, no children):");
    println!("{:<6} {:>10} {:>10} {:>10}", "State", "Age 21", "Age 40", "Age 64");
    println!("{}", "-".repeat(40));
    for &state in STATES {
        let at_age = |age: u8| {
            rows.iter()
                .find(|r| r.state == state && r.adult_age == age && r.children == 0)
                .map(|r| r.silver)
                .unwrap_or(0.0)
        };
        println!(
            "{:<6} {:>10.2} {:>10.2} {:>10.2}",
            state,
            at_age(21),
            at_age(40),
            at_age(64)
        );
    }

    // The 3:1 band should survive every state's geographic scaling
    for &state in STATES {
        let young = rows
            .iter()
            .find(|r| r.state == state && r.adult_age == 21 && r.children == 0);
        let old = rows
            .iter()
            .find(|r| r.state == state && r.adult_age == 64 && r.children == 0);
        if let (Some(young), Some(old)) = (young, old) {
            let ratio = old.silver / young.silver;
            if (ratio - 3.0).abs() > 1e-9 {
                log::warn!("state {} violates the 3:1 band: ratio {:.6}", state, ratio);
            }
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
