//! The borrower's intake profile as submitted by the client form.
//!
//! Monetary fields arrive as free-text strings (client form state)
//! and are sanitized here before any arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::{DownpaymentBracket, Money, Percent, PropertyUsage, Province, QuotePath};

/// Yes/no flag as the form submits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Borrower intake profile. Ephemeral — held in client form state,
/// never persisted as its own entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorrowerProfile {
    pub property_value: String,
    pub mortgage_balance: String,
    pub heloc_balance: String,
    pub borrow_additional_amount: String,
    pub borrow_additional_funds: YesNo,
    pub province: Option<Province>,
    pub property_usage: PropertyUsage,
    pub downpayment: DownpaymentBracket,
    pub amortization_period: Decimal,
    pub path: QuotePath,
}

impl BorrowerProfile {
    /// Province with the documented ON fallback when absent.
    pub fn province(&self) -> Province {
        self.province.unwrap_or_default()
    }

    pub fn property_value(&self) -> Money {
        parse_money(&self.property_value)
    }

    /// Total principal to quote on: balance, plus the additional
    /// borrow when requested, plus any HELOC balance.
    pub fn total_mortgage_required(&self) -> Money {
        let additional = if self.borrow_additional_funds.is_yes() {
            parse_money(&self.borrow_additional_amount)
        } else {
            Decimal::ZERO
        };
        parse_money(&self.mortgage_balance) + additional + parse_money(&self.heloc_balance)
    }

    /// Amortization in years, floored to the standard 25 when the
    /// form left it unset or nonsensical.
    pub fn amortization_years(&self) -> Decimal {
        if self.amortization_period > Decimal::ZERO {
            self.amortization_period
        } else {
            dec!(25)
        }
    }
}

/// Sanitize a free-text money string: keep digits and the first
/// decimal point, drop everything else, treat an empty or
/// unparseable result as zero.
pub fn parse_money(raw: &str) -> Money {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(c);
            }
            _ => {}
        }
    }
    if cleaned.ends_with('.') {
        cleaned.pop();
    }
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// LTV as a percentage; zero when the property value is unknown.
pub fn loan_to_value(total_mortgage_required: Money, property_value: Money) -> Percent {
    if property_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_mortgage_required / property_value * dec!(100)
}
