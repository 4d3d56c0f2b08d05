//! Insurance premium exemption schedules keyed on the annual premium

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One bracket of an exemption schedule
///
/// Applies when the annual premium is at or below `upper` (inclusive).
/// The exemption inside the bracket is `rate * annual_fee + offset`, so a
/// full exemption is `(1.0, 0.0)` and a flat cap is `(0.0, cap)`.
/// `upper == None` marks the unbounded last bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExemptionBracket {
    pub upper: Option<f64>,
    pub rate: f64,
    pub offset: f64,
}

impl ExemptionBracket {
    pub const fn new(upper: Option<f64>, rate: f64, offset: f64) -> Self {
        Self { upper, rate, offset }
    }

    /// Whole premium is exempt
    pub const fn full(upper: f64) -> Self {
        Self::new(Some(upper), 1.0, 0.0)
    }

    /// Fixed exemption regardless of premium
    pub const fn flat(amount: f64) -> Self {
        Self::new(None, 0.0, amount)
    }

    fn applies(&self, annual_fee: f64) -> bool {
        match self.upper {
            Some(upper) => annual_fee <= upper,
            None => true,
        }
    }

    fn amount(&self, annual_fee: f64) -> f64 {
        // A flat cap must not pick up NaN from 0 * inf
        if self.rate == 0.0 {
            return self.offset;
        }
        self.rate * annual_fee + self.offset
    }
}

/// Income tax exemption for life insurance premiums.
///
/// - up to ¥20,000: the full premium
/// - up to ¥40,000: half the premium plus ¥10,000
/// - up to ¥80,000: a quarter of the premium plus ¥20,000
/// - above ¥80,000: flat ¥40,000
pub(crate) const INCOME_TAX_EXEMPTION_BRACKETS: [ExemptionBracket; 4] = [
    ExemptionBracket::full(20_000.0),
    ExemptionBracket::new(Some(40_000.0), 0.5, 10_000.0),
    ExemptionBracket::new(Some(80_000.0), 0.25, 20_000.0),
    ExemptionBracket::flat(40_000.0),
];

/// Residential tax exemption for life insurance premiums.
///
/// - up to ¥12,000: the full premium
/// - up to ¥32,000: half the premium plus ¥6,000
/// - up to ¥56,000: a quarter of the premium plus ¥14,000
/// - above ¥56,000: flat ¥28,000
pub(crate) const RESIDENTIAL_TAX_EXEMPTION_BRACKETS: [ExemptionBracket; 4] = [
    ExemptionBracket::full(12_000.0),
    ExemptionBracket::new(Some(32_000.0), 0.5, 6_000.0),
    ExemptionBracket::new(Some(56_000.0), 0.25, 14_000.0),
    ExemptionBracket::flat(28_000.0),
];

/// First bracket in ascending order wins; anything past the table falls
/// into the last bracket.
pub(crate) fn lookup(brackets: &[ExemptionBracket], annual_fee: f64) -> f64 {
    brackets
        .iter()
        .find(|bracket| bracket.applies(annual_fee))
        .or_else(|| brackets.last())
        .map(|bracket| bracket.amount(annual_fee))
        .unwrap_or(0.0)
}

/// Ordered exemption brackets
#[derive(Debug, Clone, PartialEq)]
pub struct ExemptionSchedule {
    brackets: Vec<ExemptionBracket>,
}

impl ExemptionSchedule {
    /// Build a schedule, checking that thresholds ascend strictly and that
    /// only the last bracket is unbounded
    pub fn new(name: &str, brackets: Vec<ExemptionBracket>) -> Result<Self> {
        if brackets.is_empty() {
            return Err(Error::invalid_schedule(name, "no brackets"));
        }

        let last = brackets.len() - 1;
        let mut previous: Option<f64> = None;

        for (i, bracket) in brackets.iter().enumerate() {
            if !bracket.rate.is_finite() || !bracket.offset.is_finite() {
                return Err(Error::invalid_schedule(
                    name,
                    format!("bracket {} has a non-finite rate or offset", i + 1),
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

    /// Income tax exemption schedule
    pub fn income_tax() -> Self {
        Self {
            brackets: INCOME_TAX_EXEMPTION_BRACKETS.to_vec(),
        }
    }

    /// Residential tax exemption schedule
    pub fn residential_tax() -> Self {
        Self {
            brackets: RESIDENTIAL_TAX_EXEMPTION_BRACKETS.to_vec(),
        }
    }

    /// Exemption for an annual premium
    pub fn amount(&self, annual_fee: f64) -> f64 {
        lookup(&self.brackets, annual_fee)
    }

    pub fn brackets(&self) -> &[ExemptionBracket] {
        &self.brackets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_exemption_below_first_threshold() {
        let schedule = ExemptionSchedule::income_tax();

        for fee in [0.0, 1.0, 12_000.0, 19_999.0, 20_000.0] {
            assert_eq!(schedule.amount(fee), fee);
        }
    }

    #[test]
    fn test_income_tax_brackets() {
        let schedule = ExemptionSchedule::income_tax();

        assert_relative_eq!(schedule.amount(30_000.0), 25_000.0);
        assert_relative_eq!(schedule.amount(60_000.0), 35_000.0);
        assert_relative_eq!(schedule.amount(100_000.0), 40_000.0);
    }

    #[test]
    fn test_income_tax_continuity() {
        let schedule = ExemptionSchedule::income_tax();

        // 40,000 and 80,000 join the neighbouring brackets
        assert_relative_eq!(schedule.amount(40_000.0), 30_000.0);
        assert_relative_eq!(schedule.amount(40_000.01), 30_000.0, epsilon = 0.01);
        assert_relative_eq!(schedule.amount(80_000.0), 40_000.0);
        assert_relative_eq!(schedule.amount(80_000.01), 40_000.0);

        // 20,000 does not: full exemption below, half-plus-offset above
        assert_eq!(schedule.amount(20_000.0), 20_000.0);
        assert_relative_eq!(schedule.amount(20_001.0), 20_000.5);
    }

    #[test]
    fn test_residential_tax_brackets() {
        let schedule = ExemptionSchedule::residential_tax();

        assert_eq!(schedule.amount(12_000.0), 12_000.0);
        assert_relative_eq!(schedule.amount(12_001.0), 12_000.5);
        assert_relative_eq!(schedule.amount(32_000.0), 22_000.0);
        assert_relative_eq!(schedule.amount(56_000.0), 28_000.0);
        assert_relative_eq!(schedule.amount(60_000.0), 28_000.0);
    }

    #[test]
    fn test_out_of_range_inputs() {
        let schedule = ExemptionSchedule::income_tax();

        assert_eq!(schedule.amount(-5_000.0), -5_000.0);
        assert_eq!(schedule.amount(f64::INFINITY), 40_000.0);
    }

    #[test]
    fn test_schedule_validation() {
        assert!(ExemptionSchedule::new("empty", vec![]).is_err());

        let unbounded_middle = vec![
            ExemptionBracket::flat(10.0),
            ExemptionBracket::flat(20.0),
        ];
        assert!(ExemptionSchedule::new("middle", unbounded_middle).is_err());

        let descending = vec![
            ExemptionBracket::full(40_000.0),
            ExemptionBracket::full(20_000.0),
            ExemptionBracket::flat(40_000.0),
        ];
        assert!(ExemptionSchedule::new("descending", descending).is_err());

        let bounded_last = vec![ExemptionBracket::full(20_000.0)];
        assert!(ExemptionSchedule::new("bounded", bounded_last).is_err());

        let schedule =
            ExemptionSchedule::new("income tax", INCOME_TAX_EXEMPTION_BRACKETS.to_vec()).unwrap();
        assert_eq!(schedule, ExemptionSchedule::income_tax());
    }
}
