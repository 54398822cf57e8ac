use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_quote_core::quote::brackets::{
    amortization_bracket, ltv_bracket, ltv_exceeds_refinance_threshold,
};
use mortgage_quote_core::quote::resolve::{effective_percent, resolve_term, CellQuery};
use mortgage_quote_core::quote::QuoteContext;
use mortgage_quote_core::rate_table::RateTableDocument;
use mortgage_quote_core::{Province, QuoteError, TermKey};

use crate::input;

/// Arguments for a single-cell resolution
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ResolveArgs {
    /// Path to the rate-table document JSON
    #[arg(long)]
    pub table: String,

    /// Province code
    #[arg(long, default_value = "ON")]
    pub province: String,

    /// Term key (threeYrFixed | fourYrFixed | fiveYrFixed | threeYrVariable | fiveYrVariable)
    #[arg(long)]
    pub term: String,

    /// Lookup context: standard-renewal | refinance | rental
    #[arg(long, default_value = "standard-renewal")]
    pub context: String,

    /// Computed LTV in percent (drives the LTV bracket)
    #[arg(long, default_value = "0")]
    pub ltv: Decimal,

    /// Amortization in years (drives the refinance/rental bracket)
    #[arg(long, default_value = "25")]
    pub amortization: Decimal,

    /// Total mortgage required
    #[arg(long, default_value = "0")]
    pub total: Decimal,

    /// Prime rate in percent (defaults to the table document's prime)
    #[arg(long)]
    pub prime: Option<Decimal>,
}

pub fn run_resolve(args: ResolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document: RateTableDocument = input::file::read_json(&args.table)?;
    let province = args.province.parse::<Province>()?;
    let term = args.term.parse::<TermKey>()?;
    let context = parse_context(&args.context)?;
    let prime = args.prime.unwrap_or(document.prime);

    let query = CellQuery {
        context,
        ltv_bracket: ltv_bracket(args.ltv),
        amortization_bracket: amortization_bracket(args.amortization),
        total_mortgage_required: args.total,
        ltv_exceeds_threshold: ltv_exceeds_refinance_threshold(args.ltv),
    };

    let resolution = resolve_term(&document.rates, province, term, &query);
    let effective = effective_percent(term, &resolution.cell, prime);

    Ok(json!({
        "province": province,
        "term": term,
        "context": context,
        "ltvBracket": query.ltv_bracket,
        "amortizationBracket": query.amortization_bracket,
        "cell": resolution.cell,
        "source": resolution.source,
        "effectivePercent": effective,
    }))
}

fn parse_context(raw: &str) -> Result<QuoteContext, QuoteError> {
    match raw {
        "standard-renewal" | "renewal" => Ok(QuoteContext::StandardRenewal),
        "refinance" => Ok(QuoteContext::Refinance),
        "rental" => Ok(QuoteContext::Rental),
        other => Err(QuoteError::InvalidInput {
            field: "context".to_string(),
            reason: format!(
                "'{other}' is not one of standard-renewal | refinance | rental"
            ),
        }),
    }
}
