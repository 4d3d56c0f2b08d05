//! After-tax insurance premium calculation
//!
//! A life insurance premium reduces taxable income by an exemption amount.
//! The tax saved is the exemption multiplied by the marginal rate that applies
//! to the income left after the exemption, once for income tax and once for
//! residential tax. The after-tax premium is what remains of the annual
//! premium after both savings, expressed per month.
//!
//! The free functions use the built-in Japanese rules. `ExemptionCalculator`
//! runs the same calculation against any `TaxRules`.

use serde::Serialize;

use crate::rules::{
    exemption_lookup, rate_lookup, TaxRules, INCOME_TAX_EXEMPTION_BRACKETS,
    INCOME_TAX_RATE_BRACKETS, RESIDENTIAL_TAX_EXEMPTION_BRACKETS, RESIDENTIAL_TAX_RATE_BRACKETS,
};

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Income tax exemption for an annual premium
pub fn income_tax_exemption(annual_fee: f64) -> f64 {
    exemption_lookup(&INCOME_TAX_EXEMPTION_BRACKETS, annual_fee)
}

/// Residential tax exemption for an annual premium
pub fn residential_tax_exemption(annual_fee: f64) -> f64 {
    exemption_lookup(&RESIDENTIAL_TAX_EXEMPTION_BRACKETS, annual_fee)
}

/// Income tax rate for an exemption-adjusted income
pub fn income_tax_rate(adjusted_income: f64) -> f64 {
    rate_lookup(&INCOME_TAX_RATE_BRACKETS, adjusted_income)
}

/// Residential tax rate for an exemption-adjusted income (flat 10%)
pub fn residential_tax_rate(adjusted_income: f64) -> f64 {
    rate_lookup(&RESIDENTIAL_TAX_RATE_BRACKETS, adjusted_income)
}

/// After-tax monthly premium under the built-in rules
///
/// Total over all inputs: a negative adjusted income falls into the lowest
/// rate bracket.
///
/// ```
/// use insurance_exemption::after_tax_monthly_fee;
///
/// assert!((after_tax_monthly_fee(1_000.0, 0.0) - 850.0).abs() < 1e-9);
/// ```
pub fn after_tax_monthly_fee(monthly_fee: f64, annual_income: f64) -> f64 {
    let annual_fee = MONTHS_PER_YEAR * monthly_fee;
    let it_exemption = income_tax_exemption(annual_fee);
    let rt_exemption = residential_tax_exemption(annual_fee);
    let it_rate = income_tax_rate(annual_income - it_exemption);
    let rt_rate = residential_tax_rate(annual_income - rt_exemption);

    (annual_fee - it_exemption * it_rate - rt_exemption * rt_rate) / MONTHS_PER_YEAR
}

/// Every intermediate value of one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeBreakdown {
    pub monthly_fee: f64,
    pub annual_income: f64,
    pub annual_fee: f64,

    pub income_tax_exemption: f64,
    pub residential_tax_exemption: f64,
    pub income_tax_rate: f64,
    pub residential_tax_rate: f64,

    /// Income tax saved per year (exemption * rate)
    pub income_tax_credit: f64,
    /// Residential tax saved per year (exemption * rate)
    pub residential_tax_credit: f64,

    pub after_tax_monthly_fee: f64,
    /// monthly_fee - after_tax_monthly_fee
    pub monthly_saving: f64,
}

/// Calculator over a configurable rule set
#[derive(Debug, Clone, Default)]
pub struct ExemptionCalculator {
    rules: TaxRules,
}

impl ExemptionCalculator {
    pub fn new(rules: TaxRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Full breakdown for one (monthly premium, annual income) pair
    pub fn breakdown(&self, monthly_fee: f64, annual_income: f64) -> FeeBreakdown {
        let annual_fee = MONTHS_PER_YEAR * monthly_fee;

        let income_tax_exemption = self.rules.income_tax_exemption.amount(annual_fee);
        let residential_tax_exemption = self.rules.residential_tax_exemption.amount(annual_fee);

        let income_tax_rate = self
            .rules
            .income_tax_rates
            .rate(annual_income - income_tax_exemption);
        let residential_tax_rate = self
            .rules
            .residential_tax_rates
            .rate(annual_income - residential_tax_exemption);

        let income_tax_credit = income_tax_exemption * income_tax_rate;
        let residential_tax_credit = residential_tax_exemption * residential_tax_rate;

        let after_tax_monthly_fee =
            (annual_fee - income_tax_credit - residential_tax_credit) / MONTHS_PER_YEAR;

        FeeBreakdown {
            monthly_fee,
            annual_income,
            annual_fee,
            income_tax_exemption,
            residential_tax_exemption,
            income_tax_rate,
            residential_tax_rate,
            income_tax_credit,
            residential_tax_credit,
            after_tax_monthly_fee,
            monthly_saving: monthly_fee - after_tax_monthly_fee,
        }
    }

    /// After-tax monthly premium under this calculator's rules
    pub fn after_tax_monthly_fee(&self, monthly_fee: f64, annual_income: f64) -> f64 {
        self.breakdown(monthly_fee, annual_income).after_tax_monthly_fee
    }
}
