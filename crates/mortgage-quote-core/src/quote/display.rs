//! Display formatting for quote rows: two-decimal percentages and
//! whole-dollar CAD amounts, with "N/A" standing in for anything
//! unquotable.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, Percent};

pub const NOT_AVAILABLE: &str = "N/A";

/// "5.44" — always two decimal places.
pub fn format_percent(value: Percent) -> String {
    format!("{:.2}", value)
}

/// "$1,744" — CAD, zero decimals, thousands separators.
pub fn format_cad(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percent_always_two_decimals() {
        assert_eq!(format_percent(dec!(5.4)), "5.40");
        assert_eq!(format_percent(dec!(5)), "5.00");
        assert_eq!(format_percent(dec!(5.449)), "5.45");
    }

    #[test]
    fn cad_groups_thousands() {
        assert_eq!(format_cad(dec!(1744.23)), "$1,744");
        assert_eq!(format_cad(dec!(999)), "$999");
        assert_eq!(format_cad(dec!(1234567.89)), "$1,234,568");
        assert_eq!(format_cad(Decimal::ZERO), "$0");
    }

    #[test]
    fn cad_half_rounds_away_from_zero() {
        assert_eq!(format_cad(dec!(1744.5)), "$1,745");
    }
}
