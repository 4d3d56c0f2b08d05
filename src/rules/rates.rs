//! Marginal tax rate schedules keyed on exemption-adjusted income

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One bracket of a rate schedule
///
/// Applies when the adjusted income is strictly below `upper`.
/// `upper == None` marks the unbounded last bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBracket {
    pub upper: Option<f64>,
    pub rate: f64,
}

impl RateBracket {
    pub const fn below(upper: f64, rate: f64) -> Self {
        Self {
            upper: Some(upper),
            rate,
        }
    }

    pub const fn unbounded(rate: f64) -> Self {
        Self { upper: None, rate }
    }

    fn applies(&self, adjusted_income: f64) -> bool {
        match self.upper {
            Some(upper) => adjusted_income < upper,
            None => true,
        }
    }
}

/// National income tax rates
///
/// - below ¥1,950,000: 5%
/// - below ¥3,300,000: 10%
/// - below ¥6,950,000: 20%
/// - below ¥9,000,000: 23%
/// - below ¥18,000,000: 33%
/// - below ¥40,000,000: 40%
/// - ¥40,000,000 and above: 45%
pub(crate) const INCOME_TAX_RATE_BRACKETS: [RateBracket; 7] = [
    RateBracket::below(1_950_000.0, 0.05),
    RateBracket::below(3_300_000.0, 0.10),
    RateBracket::below(6_950_000.0, 0.20),
    RateBracket::below(9_000_000.0, 0.23),
    RateBracket::below(18_000_000.0, 0.33),
    RateBracket::below(40_000_000.0, 0.40),
    RateBracket::unbounded(0.45),
];

/// Residential tax is a flat 10% (prefectural 4% + municipal 6%)
pub(crate) const RESIDENTIAL_TAX_RATE_BRACKETS: [RateBracket; 1] = [RateBracket::unbounded(0.10)];

pub(crate) fn lookup(brackets: &[RateBracket], adjusted_income: f64) -> f64 {
    brackets
        .iter()
        .find(|bracket| bracket.applies(adjusted_income))
        .or_else(|| brackets.last())
        .map(|bracket| bracket.rate)
        .unwrap_or(0.0)
}

/// Ordered rate brackets
#[derive(Debug, Clone, PartialEq)]
pub struct RateSchedule {
    brackets: Vec<RateBracket>,
}

impl RateSchedule {
    /// Build a schedule, checking ascending thresholds, an unbounded last
    /// bracket and rates within [0, 1]
    pub fn new(name: &str, brackets: Vec<RateBracket>) -> Result<Self> {
        if brackets.is_empty() {
            return Err(Error::invalid_schedule(name, "no brackets"));
        }

        let last = brackets.len() - 1;
        let mut previous: Option<f64> = None;

        for (i, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.rate) {
                return Err(Error::invalid_schedule(
                    name,
                    format!("bracket {} rate {} is outside [0, 1]", i + 1, bracket.rate),
                ));
            }

            match (bracket.upper, i == last) {
                (None, true) => {}
                (None, false) => {
                    return Err(Error::invalid_schedule(
                        name,
                        format!("bracket {} is unbounded but not last", i + 1),
                    ));
                }
                (Some(_), true) => {
                    return Err(Error::invalid_schedule(name, "last bracket must be unbounded"));
                }
                (Some(upper), false) => {
                    if !upper.is_finite() || previous.is_some_and(|p| upper <= p) {
                        return Err(Error::invalid_schedule(
                            name,
                            format!("bracket {} threshold {} is not ascending", i + 1, upper),
                        ));
                    }
                    previous = Some(upper);
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Same rate for every income
    pub fn flat(rate: f64) -> Self {
        Self {
            brackets: vec![RateBracket::unbounded(rate)],
        }
    }

    pub fn income_tax() -> Self {
        Self {
            brackets: INCOME_TAX_RATE_BRACKETS.to_vec(),
        }
    }

    pub fn residential_tax() -> Self {
        Self {
            brackets: RESIDENTIAL_TAX_RATE_BRACKETS.to_vec(),
        }
    }

    /// Rate for an exemption-adjusted income
    pub fn rate(&self, adjusted_income: f64) -> f64 {
        lookup(&self.brackets, adjusted_income)
    }

    pub fn brackets(&self) -> &[RateBracket] {
        &self.brackets
    }
}
