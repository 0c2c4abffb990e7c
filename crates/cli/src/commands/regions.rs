//! Supported regions CLI command.
//!
//! Lists the canonical currency regions and, on request, the World Bank
//! indicator catalog with each series' polarity.

use anyhow::Result;
use clap::Args;

use fx_bias_core::{Polarity, Region, WORLD_BANK_INDICATORS};

/// Arguments for the regions command.
#[derive(Args, Debug, Clone)]
pub struct RegionsArgs {
    /// Also list the World Bank indicator catalog
    #[arg(long)]
    pub indicators: bool,
}

/// Runs the regions command.
///
/// # Errors
/// Never fails; the signature matches the other commands.
pub async fn run_regions(args: RegionsArgs) -> Result<()> {
    println!();
    println!("{}", "=".repeat(60));
    println!("  SUPPORTED REGIONS");
    println!("{}", "=".repeat(60));
    println!("{:<10} {:<22} {:<6}", "Currency", "Country", "ISO3");
    println!("{}", "-".repeat(60));
    for region in Region::all() {
        println!(
            "{:<10} {:<22} {:<6}",
            region.currency(),
            region.country_name(),
            region.country_code()
        );
    }
    println!("{}", "-".repeat(60));
    println!("{} region(s)", Region::all().len());
    println!();

    if args.indicators {
        print_indicator_catalog();
    }

    Ok(())
}

fn print_indicator_catalog() {
    println!("{}", "=".repeat(96));
    println!("  WORLD BANK INDICATOR CATALOG");
    println!("{}", "=".repeat(96));
    println!("{:<42} {:<22} {:<12}", "Indicator", "Series code", "Direction");
    println!("{}", "-".repeat(96));
    for spec in WORLD_BANK_INDICATORS {
        println!(
            "{:<42} {:<22} {:<12}",
            spec.name,
            spec.code,
            direction_label(spec.polarity)
        );
        println!("    {}", spec.rationale);
    }
    println!("{}", "-".repeat(96));
    println!("{} indicator(s)", WORLD_BANK_INDICATORS.len());
    println!();
}

fn direction_label(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Favorable => "higher = up",
        Polarity::Unfavorable => "higher = down",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_labels_cover_both_polarities() {
        assert_eq!(direction_label(Polarity::Favorable), "higher = up");
        assert_eq!(direction_label(Polarity::Unfavorable), "higher = down");
    }

    #[tokio::test]
    async fn run_regions_succeeds() {
        let args = RegionsArgs { indicators: true };
        assert!(run_regions(args).await.is_ok());
    }
}
