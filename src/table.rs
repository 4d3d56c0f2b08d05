//! Grid of after-tax premiums across premium levels and incomes

use serde::{Deserialize, Serialize};

use crate::calculator::ExemptionCalculator;

/// Default grid: ¥1,000 .. ¥7,000 per month
pub const DEFAULT_FEE_START: f64 = 1_000.0;
pub const DEFAULT_FEE_STEP: f64 = 1_000.0;
pub const DEFAULT_FEE_COUNT: usize = 7;

/// Default grid: ¥0 .. ¥20,100,000 per year
pub const DEFAULT_INCOME_START: f64 = 0.0;
pub const DEFAULT_INCOME_STEP: f64 = 100_000.0;
pub const DEFAULT_INCOME_COUNT: usize = 202;

/// Grid of monthly premiums and annual incomes to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub fee_start: f64,
    pub fee_step: f64,
    pub fee_count: usize,
    pub income_start: f64,
    pub income_step: f64,
    pub income_count: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            fee_start: DEFAULT_FEE_START,
            fee_step: DEFAULT_FEE_STEP,
            fee_count: DEFAULT_FEE_COUNT,
            income_start: DEFAULT_INCOME_START,
            income_step: DEFAULT_INCOME_STEP,
            income_count: DEFAULT_INCOME_COUNT,
        }
    }
}

impl GridConfig {
    /// Monthly premium levels in ascending order
    pub fn fee_levels(&self) -> Vec<f64> {
        (0..self.fee_count)
            .map(|i| self.fee_start + self.fee_step * i as f64)
            .collect()
    }

    /// Annual income levels in ascending order
    pub fn income_levels(&self) -> Vec<f64> {
        (0..self.income_count)
            .map(|i| self.income_start + self.income_step * i as f64)
            .collect()
    }
}

/// After-tax premiums for one monthly premium level, one value per income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSeries {
    pub monthly_fee: f64,
    pub after_tax_fees: Vec<f64>,
}

/// Series ordered by ascending premium, plus the shared income axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub incomes: Vec<f64>,
    pub series: Vec<FeeSeries>,
}

impl ResultTable {
    /// (annual income, after-tax monthly premium) pairs of one series
    pub fn points<'a>(&'a self, series: &'a FeeSeries) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.incomes
            .iter()
            .copied()
            .zip(series.after_tax_fees.iter().copied())
    }

    /// Total number of computed values
    pub fn len(&self) -> usize {
        self.series.iter().map(|s| s.after_tax_fees.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Evaluate the calculator over every (premium, income) pair of the grid
pub fn generate_table(calculator: &ExemptionCalculator, grid: &GridConfig) -> ResultTable {
    let incomes = grid.income_levels();

    let series: Vec<FeeSeries> = grid
        .fee_levels()
        .into_iter()
        .map(|monthly_fee| {
            let after_tax_fees = incomes
                .iter()
                .map(|&income| calculator.after_tax_monthly_fee(monthly_fee, income))
                .collect();
            FeeSeries {
                monthly_fee,
                after_tax_fees,
            }
        })
        .collect();

    log::debug!("Generated {} series x {} incomes", series.len(), incomes.len());

    ResultTable { incomes, series }
}

/// Default grid under the built-in rules
pub fn generate_default_table() -> ResultTable {
    generate_table(&ExemptionCalculator::default(), &GridConfig::default())
}
