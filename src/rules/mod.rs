//! Tax rules: exemption schedules and rate schedules

mod exemption;
mod rates;
pub mod loader;

pub use exemption::{ExemptionBracket, ExemptionSchedule};
pub use rates::{RateBracket, RateSchedule};
pub use loader::LoadedRules;

pub(crate) use exemption::{
    lookup as exemption_lookup, INCOME_TAX_EXEMPTION_BRACKETS, RESIDENTIAL_TAX_EXEMPTION_BRACKETS,
};
pub(crate) use rates::{
    lookup as rate_lookup, INCOME_TAX_RATE_BRACKETS, RESIDENTIAL_TAX_RATE_BRACKETS,
};

use std::path::Path;

use crate::error::Result;

/// Container for all bracket tables used by the calculator
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRules {
    pub income_tax_exemption: ExemptionSchedule,
    pub residential_tax_exemption: ExemptionSchedule,
    pub income_tax_rates: RateSchedule,
    pub residential_tax_rates: RateSchedule,
}

impl TaxRules {
    /// Japanese life insurance premium exemption rules
    pub fn japan() -> Self {
        Self {
            income_tax_exemption: ExemptionSchedule::income_tax(),
            residential_tax_exemption: ExemptionSchedule::residential_tax(),
            income_tax_rates: RateSchedule::income_tax(),
            residential_tax_rates: RateSchedule::residential_tax(),
        }
    }

    /// Load rules from CSV files in the default location (data/tax_rules/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RULES_PATH))
    }

    /// Load rules from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedRules::load_from(path)?;
        let rules = Self::from_loaded(loaded)?;
        log::info!("Loaded tax rules from {}", path.display());
        Ok(rules)
    }

    /// Validate raw tables into schedules
    pub fn from_loaded(loaded: LoadedRules) -> Result<Self> {
        Ok(Self {
            income_tax_exemption: ExemptionSchedule::new(
                "income tax exemption",
                loaded.income_tax_exemption,
            )?,
            residential_tax_exemption: ExemptionSchedule::new(
                "residential tax exemption",
                loaded.residential_tax_exemption,
            )?,
            income_tax_rates: RateSchedule::new("income tax rate", loaded.income_tax_rates)?,
            residential_tax_rates: RateSchedule::new(
                "residential tax rate",
                loaded.residential_tax_rates,
            )?,
        })
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::japan()
    }
}
