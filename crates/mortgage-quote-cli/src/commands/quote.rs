use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use mortgage_quote_core::quote::profile::YesNo;
use mortgage_quote_core::quote::{compute_quotes, BorrowerProfile, QuoteInput};
use mortgage_quote_core::rate_table::RateTableDocument;
use mortgage_quote_core::{DownpaymentBracket, PropertyUsage, Province, QuoteError, QuotePath};

use crate::input;

/// Arguments for a full quote run
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Path to a full QuoteInput JSON (profile + rates + prime; overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to the standard rate-table document JSON
    #[arg(long)]
    pub table: Option<String>,

    /// Path to the dedicated rental rate-table document JSON
    #[arg(long)]
    pub rental_table: Option<String>,

    /// Prime rate in percent (defaults to the table document's prime)
    #[arg(long)]
    pub prime: Option<Decimal>,

    /// Property value (free-text money, e.g. "$500,000")
    #[arg(long)]
    pub property_value: Option<String>,

    /// Current mortgage balance
    #[arg(long)]
    pub mortgage_balance: Option<String>,

    /// HELOC balance
    #[arg(long, default_value = "0")]
    pub heloc_balance: String,

    /// Additional amount to borrow
    #[arg(long, default_value = "0")]
    pub borrow_additional_amount: String,

    /// Borrow the additional amount
    #[arg(long)]
    pub borrow_additional_funds: bool,

    /// Province code (defaults to ON)
    #[arg(long)]
    pub province: Option<String>,

    /// Property usage: primary | suite | second-home | rental
    #[arg(long, default_value = "primary")]
    pub property_usage: String,

    /// Stated downpayment is less than 20%
    #[arg(long)]
    pub low_downpayment: bool,

    /// Remaining amortization in years
    #[arg(long, default_value = "25")]
    pub amortization: Decimal,

    /// Quote the refinance path instead of renewal
    #[arg(long)]
    pub refinance: bool,

    /// Requested extended amortization in years (refinance slider)
    #[arg(long)]
    pub extend_amortization: Option<Decimal>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: QuoteInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_json::<QuoteInput>()? {
        piped
    } else {
        build_input_from_flags(&args)?
    };

    let output = compute_quotes(&quote_input)?;
    Ok(serde_json::to_value(output)?)
}

fn build_input_from_flags(args: &QuoteArgs) -> Result<QuoteInput, Box<dyn std::error::Error>> {
    let table_path = args
        .table
        .as_ref()
        .ok_or("--table is required (or provide --input / piped stdin)")?;
    let document: RateTableDocument = input::file::read_json(table_path)?;

    let rental_rates = match args.rental_table {
        Some(ref path) => {
            let rental: RateTableDocument = input::file::read_json(path)?;
            Some(rental.rates)
        }
        None => None,
    };

    let province = match args.province {
        Some(ref code) => Some(code.parse::<Province>()?),
        None => None,
    };

    let profile = BorrowerProfile {
        property_value: args
            .property_value
            .clone()
            .ok_or("--property-value is required (or provide --input)")?,
        mortgage_balance: args
            .mortgage_balance
            .clone()
            .ok_or("--mortgage-balance is required (or provide --input)")?,
        heloc_balance: args.heloc_balance.clone(),
        borrow_additional_amount: args.borrow_additional_amount.clone(),
        borrow_additional_funds: if args.borrow_additional_funds {
            YesNo::Yes
        } else {
            YesNo::No
        },
        province,
        property_usage: parse_property_usage(&args.property_usage)?,
        downpayment: if args.low_downpayment {
            DownpaymentBracket::LessThan20
        } else {
            DownpaymentBracket::TwentyOrMore
        },
        amortization_period: args.amortization,
        path: if args.refinance {
            QuotePath::Refinance
        } else {
            QuotePath::Renew
        },
    };

    let prime = args.prime.unwrap_or(document.prime).max(dec!(0));

    Ok(QuoteInput {
        profile,
        rates: document.rates,
        rental_rates,
        prime,
        amortization_override: args.extend_amortization,
    })
}

fn parse_property_usage(raw: &str) -> Result<PropertyUsage, QuoteError> {
    match raw {
        "primary" => Ok(PropertyUsage::PrimaryResidence),
        "suite" => Ok(PropertyUsage::PrimaryResidenceWithSuite),
        "second-home" => Ok(PropertyUsage::SecondHome),
        "rental" => Ok(PropertyUsage::RentalInvestment),
        other => Err(QuoteError::InvalidInput {
            field: "property-usage".to_string(),
            reason: format!(
                "'{other}' is not one of primary | suite | second-home | rental"
            ),
        }),
    }
}
