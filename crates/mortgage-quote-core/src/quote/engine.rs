//! The quote engine: borrower profile + rate table + prime in, five
//! displayable quote rows out.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::quote::brackets::{
    amortization_bracket, ltv_exceeds_refinance_threshold, profile_ltv_bracket, QuoteContext,
};
use crate::quote::display::{format_cad, format_percent, NOT_AVAILABLE};
use crate::quote::payment::{extended_amortization, monthly_payment};
use crate::quote::profile::BorrowerProfile;
use crate::quote::resolve::{
    effective_percent, resolve_term, CellQuery, Resolution, ResolutionSource,
};
use crate::rate_table::RateTable;
use crate::types::{
    with_metadata, AmortizationBracket, ComputationOutput, LtvBracket, Money, Percent, TermKey,
};
use crate::QuoteResult;

/// Everything a quote run needs. `rental_rates`, when present, is
/// the dedicated rental table stored as its own document; supplying
/// it switches the run to rental pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    pub profile: BorrowerProfile,
    pub rates: RateTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_rates: Option<RateTable>,
    #[serde(default)]
    pub prime: Percent,
    /// Requested amortization from the extend-for-refinance slider;
    /// clamped to (current + 1)..=30 years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amortization_override: Option<Decimal>,
}

/// One displayable quote row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub term: TermKey,
    pub term_label: String,
    /// Effective percentage quoted, 2 decimals. For variable terms
    /// this is prime plus the stored adjustment, floored at zero.
    pub rate_percent: Percent,
    pub monthly_payment: Option<Money>,
    /// "5.44"
    pub percentage_display: String,
    /// "$1,744", or "N/A" when the payment is unquotable.
    pub payment_display: String,
    pub lender: String,
    pub source: ResolutionSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOutput {
    pub quotes: Vec<RateQuote>,
    pub total_mortgage_required: Money,
    pub ltv: Percent,
    pub ltv_bracket: LtvBracket,
    pub amortization_bracket: AmortizationBracket,
    pub amortization_years: Decimal,
    pub context: QuoteContext,
}

/// Resolve and price all five terms for a borrower.
pub fn compute_quotes(input: &QuoteInput) -> QuoteResult<ComputationOutput<QuoteOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let profile = &input.profile;
    let province = profile.province();
    let total = profile.total_mortgage_required();
    let property_value = profile.property_value();
    let (ltv, ltv_bracket) = profile_ltv_bracket(profile);

    if property_value <= Decimal::ZERO {
        warnings.push("Property value is unknown; pricing at the over80 bracket".to_string());
    }

    let rental_table_in_use = input.rental_rates.is_some();
    let context = QuoteContext::derive(profile, rental_table_in_use);
    let table = input.rental_rates.as_ref().unwrap_or(&input.rates);

    if table.province(province).is_none() {
        warnings.push(format!(
            "Province {province} is not priced in the rate table; using defaults"
        ));
    }

    let amortization_years = match (context, input.amortization_override) {
        (_, Some(requested)) => extended_amortization(profile.amortization_years(), requested),
        // The initial renewal page always quotes on the standard
        // 25-year schedule.
        (QuoteContext::StandardRenewal, None) => dec!(25),
        (_, None) => profile.amortization_years(),
    };
    let amortization_bracket = amortization_bracket(profile.amortization_years());

    let prime = if input.prime < Decimal::ZERO {
        warnings.push(format!("Prime rate {} is negative; treating as 0", input.prime));
        Decimal::ZERO
    } else {
        input.prime
    };
    if prime.is_zero() {
        warnings.push("Prime rate unavailable; variable quotes are adjustment-only".to_string());
    }

    let query = CellQuery {
        context,
        ltv_bracket,
        amortization_bracket,
        total_mortgage_required: total,
        ltv_exceeds_threshold: ltv_exceeds_refinance_threshold(ltv),
    };

    let mut quotes = Vec::with_capacity(TermKey::ALL.len());
    for term in TermKey::ALL {
        let resolution = resolve_term(table, province, term, &query);
        if resolution.source == ResolutionSource::Defaulted {
            warnings.push(format!(
                "No {term} cell for {province} in context {context}; quoting the default cell"
            ));
        }
        quotes.push(build_quote(
            term,
            resolution,
            prime,
            total,
            amortization_years,
        ));
    }

    let output = QuoteOutput {
        quotes,
        total_mortgage_required: total,
        ltv: ltv.round_dp(2),
        ltv_bracket,
        amortization_bracket,
        amortization_years,
        context,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bracketed rate resolution with semi-annual-compounding annuity payments",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn build_quote(
    term: TermKey,
    resolution: Resolution,
    prime: Percent,
    principal: Money,
    amortization_years: Decimal,
) -> RateQuote {
    let rate_percent = effective_percent(term, &resolution.cell, prime).round_dp(2);
    let payment = monthly_payment(principal, rate_percent, amortization_years);
    let payment_display = payment
        .map(format_cad)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    RateQuote {
        term,
        term_label: term.label().to_string(),
        rate_percent,
        monthly_payment: payment,
        percentage_display: format_percent(rate_percent),
        payment_display,
        lender: resolution.cell.lender,
        source: resolution.source,
    }
}
