//! Insurance Exemption CLI
//!
//! Prints the after-tax cost of one monthly insurance premium at one annual
//! taxable income

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use insurance_exemption::{chart::CurrencyFormat, ExemptionCalculator, TaxRules};

#[derive(Debug, Parser)]
#[command(name = "insurance-exemption", version, about)]
struct Args {
    /// Monthly insurance premium (yen)
    #[arg(short = 'f', long, allow_negative_numbers = true)]
    monthly_fee: f64,

    /// Annual taxable income (yen)
    #[arg(short = 'i', long, allow_negative_numbers = true)]
    income: f64,

    /// Directory of tax rule CSV files (built-in rules when omitted)
    #[arg(long, env = "INSURANCE_RULES_DIR")]
    rules: Option<PathBuf>,

    /// Print the breakdown as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let rules = match &args.rules {
        Some(dir) => TaxRules::from_csv_path(dir)
            .with_context(|| format!("loading tax rules from {}", dir.display()))?,
        None => TaxRules::japan(),
    };

    let calculator = ExemptionCalculator::new(rules);
    let b = calculator.breakdown(args.monthly_fee, args.income);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&b)?);
        return Ok(());
    }

    let yen = CurrencyFormat::yen();

    println!("Insurance Exemption v{}", env!("CARGO_PKG_VERSION"));
    println!("=========================\n");

    println!("Monthly premium:   {:>14}", yen.format(b.monthly_fee));
    println!("Annual premium:    {:>14}", yen.format(b.annual_fee));
    println!("Taxable income:    {:>14}", yen.format(b.annual_income));
    println!();

    println!("{:<16} {:>14} {:>8} {:>14}", "", "Exemption", "Rate", "Tax saved");
    println!("{}", "-".repeat(55));
    println!(
        "{:<16} {:>14} {:>7.0}% {:>14}",
        "Income tax",
        yen.format(b.income_tax_exemption),
        b.income_tax_rate * 100.0,
        yen.format(b.income_tax_credit),
    );
    println!(
        "{:<16} {:>14} {:>7.0}% {:>14}",
        "Residential tax",
        yen.format(b.residential_tax_exemption),
        b.residential_tax_rate * 100.0,
        yen.format(b.residential_tax_credit),
    );
    println!();

    println!("After-tax monthly premium: {:.2}", b.after_tax_monthly_fee);
    println!("Monthly saving:            {:.2}", b.monthly_saving);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_income_argument() {
        let args = Args::try_parse_from([
            "insurance-exemption",
            "--monthly-fee",
            "1000",
            "--income",
            "-100000",
        ])
        .unwrap();
        assert_eq!(args.monthly_fee, 1_000.0);
        assert_eq!(args.income, -100_000.0);

        let b = ExemptionCalculator::default().breakdown(args.monthly_fee, args.income);
        assert!((b.after_tax_monthly_fee - 850.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_fee_short_flag() {
        let args = Args::try_parse_from(["insurance-exemption", "-f", "-500", "-i", "0"]).unwrap();
        assert_eq!(args.monthly_fee, -500.0);
        assert_eq!(args.income, 0.0);
        assert!(!args.json);
    }
}
