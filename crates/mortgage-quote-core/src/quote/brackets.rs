//! Bracket selection: which cell of the table a borrower prices off.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::quote::profile::{loan_to_value, BorrowerProfile};
use crate::types::{
    AmortizationBracket, DownpaymentBracket, LtvBracket, Money, Percent, QuotePath,
};

/// LTV above which the general renewal flow consults the refinance
/// sub-map, and above which the edit gate blocks.
pub const REFINANCE_LTV_THRESHOLD: Decimal = dec!(80);

/// Pure bracket ladder over a computed LTV. Exactly one bracket
/// applies to any value.
pub fn ltv_bracket(ltv: Percent) -> LtvBracket {
    if ltv <= dec!(65) {
        LtvBracket::Under65
    } else if ltv <= dec!(70) {
        LtvBracket::Under70
    } else if ltv <= dec!(75) {
        LtvBracket::Under75
    } else if ltv <= dec!(80) {
        LtvBracket::Under80
    } else {
        LtvBracket::Over80
    }
}

/// Bracket selection with the policy overrides layered on:
/// a stated sub-20% downpayment forces `over80` (insured-mortgage
/// treatment), and an unknown property value prices at the most
/// conservative bracket.
pub fn select_ltv_bracket(
    ltv: Percent,
    property_value: Money,
    downpayment: DownpaymentBracket,
) -> LtvBracket {
    if downpayment == DownpaymentBracket::LessThan20 {
        return LtvBracket::Over80;
    }
    if property_value <= Decimal::ZERO {
        return LtvBracket::Over80;
    }
    ltv_bracket(ltv)
}

/// Refinance/rental pricing bracket from stated amortization.
pub fn amortization_bracket(years: Decimal) -> AmortizationBracket {
    if years <= dec!(25) {
        AmortizationBracket::Under25
    } else {
        AmortizationBracket::Over25
    }
}

/// The general renewal flow's test for whether to consult the
/// refinance sub-map. Kept separate from [`amortization_bracket`]:
/// the two refinance definitions are distinct product rules.
pub fn ltv_exceeds_refinance_threshold(ltv: Percent) -> bool {
    ltv > REFINANCE_LTV_THRESHOLD
}

/// Which lookup rules apply for this quote run. One engine,
/// parameterized, instead of per-page reimplementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteContext {
    StandardRenewal,
    Refinance,
    Rental,
}

impl QuoteContext {
    /// Derive the context from the profile. Rental pricing takes
    /// precedence: a rental-usage refinance still prices off the
    /// rental sub-map, which is keyed by the same amortization
    /// brackets.
    pub fn derive(profile: &BorrowerProfile, rental_table_in_use: bool) -> Self {
        if profile.property_usage.is_rental_priced() || rental_table_in_use {
            Self::Rental
        } else if profile.path == QuotePath::Refinance {
            Self::Refinance
        } else {
            Self::StandardRenewal
        }
    }
}

impl std::fmt::Display for QuoteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::StandardRenewal => "standard-renewal",
            Self::Refinance => "refinance",
            Self::Rental => "rental",
        };
        write!(f, "{}", s)
    }
}

/// Convenience: LTV and selected bracket straight from a profile.
pub fn profile_ltv_bracket(profile: &BorrowerProfile) -> (Percent, LtvBracket) {
    let property_value = profile.property_value();
    let ltv = loan_to_value(profile.total_mortgage_required(), property_value);
    let bracket = select_ltv_bracket(ltv, property_value, profile.downpayment);
    (ltv, bracket)
}
