//! Insurance Exemption - after-tax cost of life insurance premiums
//!
//! This library provides:
//! - Income tax and residential tax exemption schedules for insurance premiums
//! - Marginal rate lookup on exemption-adjusted income
//! - After-tax monthly premium calculation, with a full breakdown
//! - Grid generation across premium levels and incomes, shaped for a line chart

pub mod error;
pub mod rules;
pub mod calculator;
pub mod table;
pub mod chart;

// Re-export commonly used types
pub use error::{Error, Result};
pub use rules::{TaxRules, ExemptionSchedule, RateSchedule};
pub use calculator::{
    after_tax_monthly_fee, income_tax_exemption, income_tax_rate, residential_tax_exemption,
    residential_tax_rate, ExemptionCalculator, FeeBreakdown,
};
pub use table::{generate_default_table, generate_table, GridConfig, ResultTable};
