use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::QuoteError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Rates as published percentages (5.00 = 5%), the form rate cells
/// and prime are stored in.
pub type Percent = Decimal;

/// Canadian province / territory code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Province {
    AB,
    BC,
    MB,
    NB,
    NL,
    NS,
    NT,
    NU,
    #[default]
    ON,
    PE,
    QC,
    SK,
    YT,
}

impl Province {
    pub const ALL: [Province; 13] = [
        Province::AB,
        Province::BC,
        Province::MB,
        Province::NB,
        Province::NL,
        Province::NS,
        Province::NT,
        Province::NU,
        Province::ON,
        Province::PE,
        Province::QC,
        Province::SK,
        Province::YT,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::AB => "AB",
            Self::BC => "BC",
            Self::MB => "MB",
            Self::NB => "NB",
            Self::NL => "NL",
            Self::NS => "NS",
            Self::NT => "NT",
            Self::NU => "NU",
            Self::ON => "ON",
            Self::PE => "PE",
            Self::QC => "QC",
            Self::SK => "SK",
            Self::YT => "YT",
        }
    }
}

impl std::fmt::Display for Province {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Province {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Province::ALL
            .iter()
            .copied()
            .find(|p| p.code() == upper)
            .ok_or_else(|| QuoteError::UnknownProvince(s.to_string()))
    }
}

/// The five offered mortgage terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TermKey {
    ThreeYrFixed,
    FourYrFixed,
    FiveYrFixed,
    ThreeYrVariable,
    FiveYrVariable,
}

impl TermKey {
    /// Display order on the quote surface.
    pub const ALL: [TermKey; 5] = [
        TermKey::ThreeYrFixed,
        TermKey::FourYrFixed,
        TermKey::FiveYrFixed,
        TermKey::ThreeYrVariable,
        TermKey::FiveYrVariable,
    ];

    pub fn is_variable(&self) -> bool {
        matches!(self, Self::ThreeYrVariable | Self::FiveYrVariable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ThreeYrFixed => "3-yr fixed",
            Self::FourYrFixed => "4-yr fixed",
            Self::FiveYrFixed => "5-yr fixed",
            Self::ThreeYrVariable => "3-yr variable",
            Self::FiveYrVariable => "5-yr variable",
        }
    }

    /// The camelCase key used in stored rate-table documents.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ThreeYrFixed => "threeYrFixed",
            Self::FourYrFixed => "fourYrFixed",
            Self::FiveYrFixed => "fiveYrFixed",
            Self::ThreeYrVariable => "threeYrVariable",
            Self::FiveYrVariable => "fiveYrVariable",
        }
    }
}

impl std::fmt::Display for TermKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for TermKey {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TermKey::ALL
            .iter()
            .copied()
            .find(|t| t.key() == s.trim())
            .ok_or_else(|| QuoteError::UnknownTerm(s.to_string()))
    }
}

/// Loan-to-value pricing bracket. Ordered by ascending LTV coverage:
/// exactly one bracket applies to any computed LTV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LtvBracket {
    Under65,
    Under70,
    Under75,
    Under80,
    Over80,
}

impl LtvBracket {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Under65 => "under65",
            Self::Under70 => "under70",
            Self::Under75 => "under75",
            Self::Under80 => "under80",
            Self::Over80 => "over80",
        }
    }
}

impl std::fmt::Display for LtvBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Amortization pricing bracket used for refinance and rental cells:
/// remaining amortization of at most 25 years, or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationBracket {
    Under25,
    Over25,
}

impl AmortizationBracket {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Under25 => "under25",
            Self::Over25 => "over25",
        }
    }
}

impl std::fmt::Display for AmortizationBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Property usage as captured on the borrower intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PropertyUsage {
    #[default]
    #[serde(rename = "Primary Residence")]
    PrimaryResidence,
    #[serde(rename = "Second Home")]
    SecondHome,
    #[serde(rename = "Primary Residence With Suite")]
    PrimaryResidenceWithSuite,
    #[serde(rename = "Rental / Investment")]
    RentalInvestment,
}

impl PropertyUsage {
    /// Second homes and rentals price off the rental table.
    pub fn is_rental_priced(&self) -> bool {
        matches!(self, Self::RentalInvestment | Self::SecondHome)
    }
}

/// Stated downpayment bracket from the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DownpaymentBracket {
    #[serde(rename = "Less than 20%")]
    LessThan20,
    #[default]
    #[serde(rename = "20% or more")]
    TwentyOrMore,
}

/// Which product flow the borrower entered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuotePath {
    #[default]
    Renew,
    Refinance,
}

/// Standard computation output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn province_round_trips_through_code() {
        for p in Province::ALL {
            assert_eq!(p.code().parse::<Province>().unwrap(), p);
        }
        assert!("XX".parse::<Province>().is_err());
    }

    #[test]
    fn term_keys_match_stored_document_keys() {
        assert_eq!(
            serde_json::to_string(&TermKey::ThreeYrFixed).unwrap(),
            "\"threeYrFixed\""
        );
        assert_eq!("fiveYrVariable".parse::<TermKey>().unwrap(), TermKey::FiveYrVariable);
    }

    #[test]
    fn ltv_brackets_are_ordered() {
        assert!(LtvBracket::Under65 < LtvBracket::Under70);
        assert!(LtvBracket::Under80 < LtvBracket::Over80);
    }
}
