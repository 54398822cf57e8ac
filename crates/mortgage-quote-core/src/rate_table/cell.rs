//! A single priced cell of the rate table.
//!
//! Stored cells have accumulated schema drift over the life of the
//! admin tooling: variable cells may be keyed `adjustment` instead of
//! `rate`, and a historic migration bug doubly nested some cells as
//! `{ "rate": { "rate": x, "lender": l } }`. All of that is
//! normalized here, at the data boundary, so no call site ever sees
//! a non-flat cell.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// Lender attributed to a cell the table does not actually price.
pub const DEFAULT_LENDER: &str = "Default Lender";

/// One priced cell: a posted percentage and the lender offering it.
///
/// For fixed terms `rate` is the posted nominal rate; for variable
/// terms it is the signed adjustment added to prime. Values are held
/// to 2 decimal places, the storage convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateCell {
    pub rate: Percent,
    pub lender: String,
}

impl RateCell {
    pub fn new(rate: Percent, lender: impl Into<String>) -> Self {
        Self {
            rate: rate.round_dp(2),
            lender: lender.into(),
        }
    }

    /// The substitute cell used whenever the table has no entry:
    /// zero rate, placeholder lender, never an error.
    pub fn defaulted() -> Self {
        Self {
            rate: Decimal::ZERO,
            lender: DEFAULT_LENDER.to_string(),
        }
    }
}

/// The `rate` value as it may appear in storage: a plain number, or
/// the doubly nested object left behind by the migration bug.
#[derive(Deserialize)]
#[serde(untagged)]
enum RateField {
    Scalar(Decimal),
    Nested(NestedCell),
}

#[derive(Deserialize)]
struct NestedCell {
    #[serde(default)]
    rate: Decimal,
    #[serde(default)]
    lender: Option<String>,
}

#[derive(Deserialize)]
struct RawCell {
    #[serde(default, alias = "adjustment")]
    rate: Option<RateField>,
    #[serde(default)]
    lender: Option<String>,
}

impl<'de> Deserialize<'de> for RateCell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCell::deserialize(deserializer)?;
        let (rate, inner_lender) = match raw.rate {
            Some(RateField::Scalar(r)) => (r, None),
            Some(RateField::Nested(n)) => (n.rate, n.lender),
            None => (Decimal::ZERO, None),
        };
        // Outer lender wins; the nested one only fills a gap.
        let lender = raw
            .lender
            .or(inner_lender)
            .unwrap_or_else(|| DEFAULT_LENDER.to_string());
        Ok(RateCell {
            rate: rate.round_dp(2),
            lender,
        })
    }
}
