//! CSV-based tax rule loader
//!
//! Loads bracket tables from CSV files in data/tax_rules/. An empty `upper`
//! cell marks the unbounded last bracket.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{ExemptionBracket, RateBracket};
use crate::error::Result;

/// Default path to the tax rules directory
pub const DEFAULT_RULES_PATH: &str = "data/tax_rules";

pub const INCOME_TAX_EXEMPTION_FILE: &str = "income_tax_exemption.csv";
pub const RESIDENTIAL_TAX_EXEMPTION_FILE: &str = "residential_tax_exemption.csv";
pub const INCOME_TAX_RATES_FILE: &str = "income_tax_rates.csv";
pub const RESIDENTIAL_TAX_RATES_FILE: &str = "residential_tax_rates.csv";

fn read_rows<T: DeserializeOwned, R: Read>(input: R) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(input);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result?;
        rows.push(row);
    }
    Ok(rows)
}

fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let rows: Vec<T> = read_rows(file)?;

    log::debug!("Loaded {} brackets from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load exemption brackets (columns: upper, rate, offset)
pub fn load_exemption_brackets(path: &Path) -> Result<Vec<ExemptionBracket>> {
    load_rows(path)
}

/// Load rate brackets (columns: upper, rate)
pub fn load_rate_brackets(path: &Path) -> Result<Vec<RateBracket>> {
    load_rows(path)
}

/// Raw bracket tables read from a rules directory, before validation
pub struct LoadedRules {
    pub income_tax_exemption: Vec<ExemptionBracket>,
    pub residential_tax_exemption: Vec<ExemptionBracket>,
    pub income_tax_rates: Vec<RateBracket>,
    pub residential_tax_rates: Vec<RateBracket>,
}

impl LoadedRules {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_RULES_PATH))
    }

    /// Load all tables from a specific directory
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            income_tax_exemption: load_exemption_brackets(&path.join(INCOME_TAX_EXEMPTION_FILE))?,
            residential_tax_exemption: load_exemption_brackets(
                &path.join(RESIDENTIAL_TAX_EXEMPTION_FILE),
            )?,
            income_tax_rates: load_rate_brackets(&path.join(INCOME_TAX_RATES_FILE))?,
            residential_tax_rates: load_rate_brackets(&path.join(RESIDENTIAL_TAX_RATES_FILE))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_rules() {
        let result = LoadedRules::load_default();
        assert!(result.is_ok(), "Failed to load rules: {:?}", result.err());

        let rules = result.unwrap();

        assert_eq!(rules.income_tax_exemption.len(), 4);
        assert_eq!(rules.residential_tax_exemption.len(), 4);
        assert_eq!(rules.income_tax_rates.len(), 7);
        assert_eq!(rules.residential_tax_rates.len(), 1);

        // Last bracket is unbounded
        assert_eq!(rules.income_tax_exemption[3].upper, None);
        assert_eq!(rules.income_tax_exemption[3].offset, 40_000.0);
        assert_eq!(rules.income_tax_rates[6].upper, None);
    }

    #[test]
    fn test_missing_directory() {
        let result = LoadedRules::load_from(Path::new("data/does_not_exist"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_malformed_threshold() {
        let input = "upper,rate,offset\nabc,1.0,0\n,0.0,40000\n";
        let result: Result<Vec<ExemptionBracket>> = read_rows(input.as_bytes());
        assert!(matches!(result, Err(crate::Error::Csv(_))));
    }

    #[test]
    fn test_missing_rate_column() {
        let input = "upper\n1950000\n\n";
        let result: Result<Vec<RateBracket>> = read_rows(input.as_bytes());
        assert!(matches!(result, Err(crate::Error::Csv(_))));
    }

    #[test]
    fn test_read_rows_from_reader() {
        let input = "upper,rate\n1950000,0.05\n,0.10\n";
        let rows: Vec<RateBracket> = read_rows(input.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![RateBracket::below(1_950_000.0, 0.05), RateBracket::unbounded(0.10)]
        );
    }
}
