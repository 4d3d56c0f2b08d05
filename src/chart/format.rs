//! Currency formatting for chart labels and axis ticks

use serde::{Deserialize, Serialize};

/// Explicit currency format handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: usize,
}

impl CurrencyFormat {
    /// Whole yen with comma grouping, e.g. ¥1,234,567
    pub fn yen() -> Self {
        Self {
            symbol: "¥".to_string(),
            thousands_separator: ',',
            decimal_separator: '.',
            fraction_digits: 0,
        }
    }

    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return amount.to_string();
        }

        let rounded = format!("{:.*}", self.fraction_digits, amount.abs());
        let (whole, fraction) = match rounded.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (rounded.as_str(), None),
        };

        let len = whole.len();
        let mut result = String::with_capacity(rounded.len() + len / 3 + self.symbol.len() + 1);

        // -0.4 rounds to "0" and is shown unsigned
        if amount < 0.0 && rounded.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
            result.push('-');
        }
        result.push_str(&self.symbol);

        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                result.push(self.thousands_separator);
            }
            result.push(c);
        }

        if let Some(fraction) = fraction {
            result.push(self.decimal_separator);
            result.push_str(fraction);
        }

        result
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::yen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yen_grouping() {
        let fmt = CurrencyFormat::yen();

        assert_eq!(fmt.format(0.0), "¥0");
        assert_eq!(fmt.format(999.0), "¥999");
        assert_eq!(fmt.format(1_000.0), "¥1,000");
        assert_eq!(fmt.format(20_100_000.0), "¥20,100,000");
        assert_eq!(fmt.format(4_183.333), "¥4,183");
        assert_eq!(fmt.format(849.6), "¥850");
    }

    #[test]
    fn test_negative_amounts() {
        let fmt = CurrencyFormat::yen();

        assert_eq!(fmt.format(-1_500.0), "-¥1,500");
        assert_eq!(fmt.format(-0.4), "¥0");
    }

    #[test]
    fn test_fraction_digits_and_separators() {
        let fmt = CurrencyFormat {
            symbol: "€".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            fraction_digits: 2,
        };

        assert_eq!(fmt.format(1_234_567.891), "€1.234.567,89");
        assert_eq!(fmt.format(0.5), "€0,50");
    }
}
