//! Annuity payment math under the Canadian mortgage convention.
//!
//! Posted Canadian mortgage rates are nominal annual rates compounded
//! semi-annually. Two compounding periods against twelve payments a
//! year gives the monthly-rate exponent 2/12 = 1/6.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

/// Below this the per-month rate is treated as zero and the payment
/// degenerates to straight principal division.
const RATE_EPSILON: Decimal = dec!(0.000000000001);

/// Effective monthly rate from a posted semi-annually-compounded
/// nominal percentage: `(1 + nominal/200)^(1/6) - 1`.
pub fn monthly_rate_from_semi_annual(nominal_percent: Percent) -> Rate {
    let semi_annual_period_rate = nominal_percent / dec!(100) / dec!(2);
    let base = Decimal::ONE + semi_annual_period_rate;
    if base <= Decimal::ZERO {
        // A nominal rate of -200% or worse has no real monthly rate.
        return Decimal::ZERO;
    }
    base.powd(Decimal::ONE / dec!(6)) - Decimal::ONE
}

/// End-of-period level payment for a fully amortizing loan, zero
/// future value. `None` stands in for the unquotable cases the UI
/// renders as "N/A": non-positive principal or term.
pub fn monthly_payment(principal: Money, nominal_percent: Percent, years: Decimal) -> Option<Money> {
    let n = (years * dec!(12)).round();
    if principal <= Decimal::ZERO || n <= Decimal::ZERO {
        return None;
    }

    let r = monthly_rate_from_semi_annual(nominal_percent);
    if r.abs() < RATE_EPSILON {
        return Some(principal / n);
    }

    let factor = (Decimal::ONE + r).checked_powd(n)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return None;
    }
    Some(principal * r * factor / denominator)
}

/// Amortization available when extending for refinance: at least one
/// year beyond the borrower's current schedule, never past 30.
pub fn extended_amortization(current_years: Decimal, requested_years: Decimal) -> Decimal {
    let upper = dec!(30);
    let lower = (current_years + Decimal::ONE).min(upper);
    if requested_years < lower {
        lower
    } else if requested_years > upper {
        upper
    } else {
        requested_years
    }
}
