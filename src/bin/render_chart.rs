//! Render the premium vs income chart
//!
//! Generates the after-tax premium grid and writes it as a Chart.js-style
//! line chart document (JSON) or as a wide CSV table

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use insurance_exemption::{
    chart::{write_csv, CurrencyFormat, LineChart},
    generate_table, ExemptionCalculator, GridConfig, TaxRules,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "render_chart", about = "Write the after-tax premium chart data")]
struct Args {
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of tax rule CSV files (built-in rules when omitted)
    #[arg(long, env = "INSURANCE_RULES_DIR")]
    rules: Option<PathBuf>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let rules = match &args.rules {
        Some(dir) => TaxRules::from_csv_path(dir)
            .with_context(|| format!("loading tax rules from {}", dir.display()))?,
        None => TaxRules::japan(),
    };

    let calculator = ExemptionCalculator::new(rules);
    let table = generate_table(&calculator, &GridConfig::default());

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Json => {
            let mut chart = LineChart::from_table(&table, &CurrencyFormat::yen());
            if let Some(title) = args.title {
                chart = chart.with_title(title);
            }
            chart.write_json(writer).context("writing chart JSON")?;
        }
        OutputFormat::Csv => {
            write_csv(&table, writer).context("writing chart CSV")?;
        }
    }

    log::info!("Rendered {} values in {:?}", table.len(), start.elapsed());
    if let Some(path) = &args.output {
        eprintln!("Output written to {}", path.display());
    }

    Ok(())
}
