//! Recommend Crops for Every Region
//!
//! Runs the recommender against each state's regional soil defaults and
//! prints the top crop, runners-up and score breakdown.
//!
//! Run with: cargo run --bin recommend_regions [seed]
//!
//! Without a seed, jitter is disabled so the output is deterministic.

use crop_recommender::recommender::package;
use crop_recommender::regional::REGIONAL_DEFAULTS;
use crop_recommender::{CropCatalog, JitterMode, Recommender};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let mode = match std::env::args().nth(1) {
        Some(seed) => JitterMode::Seeded(seed.parse()?),
        None => JitterMode::Disabled,
    };

    let catalog = Arc::new(CropCatalog::builtin()?);
    println!("\nCrop catalog: {} crops", catalog.len());
    println!("Jitter: {:?}\n", mode);

    let recommender = Recommender::new(catalog);

    for (i, region) in REGIONAL_DEFAULTS.iter().enumerate() {
        let query = region.to_query();
        let mut jitter = mode.source(i as u64);
        let ranked = recommender.rank(&query, jitter.as_mut())?;
        let result = package(&ranked)?;

        println!("{}", "=".repeat(72));
        println!(
            "{} - {} soil, {:.0} mm, pH {:.1}, N {:.0}",
            region.state, region.soil, region.rainfall_mm, region.ph, region.nitrogen
        );
        println!("{}", "=".repeat(72));
        println!("  Recommended: {} ({}) - {}%", result.crop_name, result.crop_hindi, result.confidence);
        for alt in &result.alternatives {
            println!("  Alternative: {} ({}) - {}%", alt.crop_name, alt.crop_hindi, alt.confidence);
        }

        println!("\n  Top 5 breakdown (soil / rain / pH / N = total):");
        for candidate in ranked.iter().take(5) {
            let b = &candidate.breakdown;
            println!(
                "    {:<28} {:>4.0} / {:>5.1} / {:>4.0} / {:>4.0} = {:>6.2}",
                candidate.crop.name,
                b.soil,
                b.rainfall,
                b.ph,
                b.nitrogen,
                candidate.score()
            );
        }
        println!();
    }

    Ok(())
}
