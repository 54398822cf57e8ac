//! The nested per-province rate table as stored by the admin back
//! office, plus the document envelope it is fetched in.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rate_table::cell::RateCell;
use crate::types::{AmortizationBracket, LtvBracket, Percent, Province, TermKey};

/// Refinance/rental pricing split on remaining amortization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketedRates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under25: Option<RateCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over25: Option<RateCell>,
}

impl BracketedRates {
    pub fn cell(&self, bracket: AmortizationBracket) -> Option<&RateCell> {
        match bracket {
            AmortizationBracket::Under25 => self.under25.as_ref(),
            AmortizationBracket::Over25 => self.over25.as_ref(),
        }
    }
}

/// Rental pricing: either bracketed like refinance, or the simpler
/// table variant with a single flat cell answering both brackets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RentalRates {
    Bracketed(BracketedRates),
    Flat(RateCell),
}

impl RentalRates {
    pub fn cell(&self, bracket: AmortizationBracket) -> Option<&RateCell> {
        match self {
            Self::Bracketed(b) => b.cell(bracket),
            Self::Flat(cell) => Some(cell),
        }
    }
}

// Both variants are maps, and both `BracketedRates` and `RateCell`
// accept a map with every field absent, so untagged deserialization
// cannot distinguish them. Decide on the presence of bracket keys.
impl<'de> Deserialize<'de> for RentalRates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_bracketed = value
            .as_object()
            .is_some_and(|m| m.contains_key("under25") || m.contains_key("over25"));
        if is_bracketed {
            serde_json::from_value(value)
                .map(RentalRates::Bracketed)
                .map_err(serde::de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(RentalRates::Flat)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Pricing for one term within one province.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermRates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under65: Option<RateCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under70: Option<RateCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under75: Option<RateCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under80: Option<RateCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over80: Option<RateCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinance: Option<BracketedRates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental: Option<RentalRates>,
}

impl TermRates {
    pub fn ltv_cell(&self, bracket: LtvBracket) -> Option<&RateCell> {
        match bracket {
            LtvBracket::Under65 => self.under65.as_ref(),
            LtvBracket::Under70 => self.under70.as_ref(),
            LtvBracket::Under75 => self.under75.as_ref(),
            LtvBracket::Under80 => self.under80.as_ref(),
            LtvBracket::Over80 => self.over80.as_ref(),
        }
    }

    pub fn refinance_cell(&self, bracket: AmortizationBracket) -> Option<&RateCell> {
        self.refinance.as_ref().and_then(|r| r.cell(bracket))
    }

    pub fn rental_cell(&self, bracket: AmortizationBracket) -> Option<&RateCell> {
        self.rental.as_ref().and_then(|r| r.cell(bracket))
    }
}

/// All five terms for one province.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvinceRates {
    pub three_yr_fixed: TermRates,
    pub four_yr_fixed: TermRates,
    pub five_yr_fixed: TermRates,
    pub three_yr_variable: TermRates,
    pub five_yr_variable: TermRates,
}

impl ProvinceRates {
    pub fn term(&self, key: TermKey) -> &TermRates {
        match key {
            TermKey::ThreeYrFixed => &self.three_yr_fixed,
            TermKey::FourYrFixed => &self.four_yr_fixed,
            TermKey::FiveYrFixed => &self.five_yr_fixed,
            TermKey::ThreeYrVariable => &self.three_yr_variable,
            TermKey::FiveYrVariable => &self.five_yr_variable,
        }
    }
}

/// The full table: province code to that province's pricing.
/// Read-only from the borrower-facing flow; replaced or patched
/// wholesale by the admin back office.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(pub BTreeMap<Province, ProvinceRates>);

impl RateTable {
    pub fn province(&self, province: Province) -> Option<&ProvinceRates> {
        self.0.get(&province)
    }
}

/// The GET payload the data store serves a rate table in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTableDocument {
    pub rates: RateTable,
    #[serde(default)]
    pub prime: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RateTableDocument {
    pub fn new(rates: RateTable, prime: Percent) -> Self {
        Self {
            rates,
            prime,
            effective_date: None,
            updated_at: None,
        }
    }
}

impl Default for RateTableDocument {
    fn default() -> Self {
        Self::new(RateTable::default(), Decimal::ZERO)
    }
}
