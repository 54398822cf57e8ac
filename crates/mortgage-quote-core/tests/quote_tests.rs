use mortgage_quote_core::quote::brackets::ltv_bracket;
use mortgage_quote_core::quote::profile::YesNo;
use mortgage_quote_core::quote::{
    compute_quotes, BorrowerProfile, QuoteContext, QuoteInput, ResolutionSource,
};
use mortgage_quote_core::rate_table::{RateTableDocument, DEFAULT_LENDER};
use mortgage_quote_core::{
    AmortizationBracket, DownpaymentBracket, LtvBracket, PropertyUsage, QuotePath, TermKey,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

/// An Ontario-only table priced the way the admin screens store it,
/// including one doubly nested cell from the historic migration bug.
fn sample_document() -> RateTableDocument {
    serde_json::from_str(
        r#"{
            "rates": {
                "ON": {
                    "threeYrFixed": {
                        "under65": {"rate": 4.84, "lender": "RBC"},
                        "under70": {"rate": 4.89, "lender": "RBC"},
                        "under75": {"rate": 4.94, "lender": "MCAP"},
                        "under80": {"rate": 4.99, "lender": "MCAP"},
                        "over80": {"rate": 5.34, "lender": "First National"},
                        "refinance": {
                            "under25": {"rate": 5.09, "lender": "MCAP"},
                            "over25": {"rate": 5.29, "lender": "MCAP"}
                        },
                        "rental": {"rate": 6.04, "lender": "Home Trust"}
                    },
                    "fourYrFixed": {
                        "under65": {"rate": 4.74, "lender": "RBC"},
                        "over80": {"rate": 5.24, "lender": "First National"}
                    },
                    "fiveYrFixed": {
                        "under65": {"rate": {"rate": 4.64, "lender": "TD"}},
                        "over80": {"rate": 5.14, "lender": "First National"},
                        "refinance": {
                            "under25": {"rate": 4.89, "lender": "TD"}
                        },
                        "rental": {
                            "under25": {"rate": 5.84, "lender": "Home Trust"},
                            "over25": {"rate": 6.04, "lender": "Home Trust"}
                        }
                    },
                    "threeYrVariable": {
                        "under65": {"adjustment": -0.65, "lender": "Scotiabank"},
                        "over80": {"adjustment": -0.25, "lender": "Scotiabank"}
                    },
                    "fiveYrVariable": {
                        "under65": {"adjustment": -0.90, "lender": "Scotiabank"},
                        "over80": {"adjustment": -0.50, "lender": "Scotiabank"}
                    }
                }
            },
            "prime": 6.45,
            "effectiveDate": "2026-08-01"
        }"#,
    )
    .expect("fixture document parses")
}

fn renewal_profile() -> BorrowerProfile {
    BorrowerProfile {
        property_value: "500000".into(),
        mortgage_balance: "300000".into(),
        borrow_additional_funds: YesNo::No,
        amortization_period: dec!(22),
        ..Default::default()
    }
}

fn quote_input(profile: BorrowerProfile) -> QuoteInput {
    let doc = sample_document();
    QuoteInput {
        profile,
        rates: doc.rates,
        rental_rates: None,
        prime: doc.prime,
        amortization_override: None,
    }
}

fn quote_for(input: &QuoteInput, term: TermKey) -> mortgage_quote_core::quote::RateQuote {
    let out = compute_quotes(input).unwrap();
    out.result
        .quotes
        .into_iter()
        .find(|q| q.term == term)
        .unwrap()
}

// ===========================================================================
// Standard renewal flow
// ===========================================================================

#[test]
fn test_renewal_scenario_500k_property_300k_balance() {
    let out = compute_quotes(&quote_input(renewal_profile())).unwrap();
    let r = &out.result;

    assert_eq!(r.total_mortgage_required, dec!(300000));
    assert_eq!(r.ltv, dec!(60));
    assert_eq!(r.ltv_bracket, LtvBracket::Under65);
    assert_eq!(r.context, QuoteContext::StandardRenewal);
    assert_eq!(r.quotes.len(), 5);
}

#[test]
fn test_renewal_quotes_fixed_term_from_ltv_cell() {
    let q = quote_for(&quote_input(renewal_profile()), TermKey::ThreeYrFixed);
    assert_eq!(q.rate_percent, dec!(4.84));
    assert_eq!(q.lender, "RBC");
    assert_eq!(q.percentage_display, "4.84");
    assert_eq!(q.source, ResolutionSource::Found);
}

#[test]
fn test_renewal_page_always_quotes_25_year_schedule() {
    // Profile says 22 years; the initial renewal page prices at 25.
    let out = compute_quotes(&quote_input(renewal_profile())).unwrap();
    assert_eq!(out.result.amortization_years, dec!(25));

    // 300k at 4.84 over 25y ≈ $1,717.
    let q = quote_for(&quote_input(renewal_profile()), TermKey::ThreeYrFixed);
    let p = q.monthly_payment.unwrap();
    assert!((p - dec!(1717)).abs() < dec!(5), "got {p}");
}

#[test]
fn test_variable_quote_is_prime_plus_adjustment() {
    let q = quote_for(&quote_input(renewal_profile()), TermKey::FiveYrVariable);
    // prime 6.45 + adjustment -0.90 = 5.55
    assert_eq!(q.rate_percent, dec!(5.55));
    assert_eq!(q.lender, "Scotiabank");
}

#[test]
fn test_variable_effective_rate_floors_at_zero() {
    let mut input = quote_input(renewal_profile());
    input.prime = dec!(0.50);
    let q = quote_for(&input, TermKey::FiveYrVariable);
    assert_eq!(q.rate_percent, Decimal::ZERO);
    assert_eq!(q.percentage_display, "0.00");
}

#[test]
fn test_doubly_nested_cell_quotes_normally() {
    let q = quote_for(&quote_input(renewal_profile()), TermKey::FiveYrFixed);
    assert_eq!(q.rate_percent, dec!(4.64));
    assert_eq!(q.lender, "TD");
}

// ===========================================================================
// Bracket policy
// ===========================================================================

#[test]
fn test_low_downpayment_forces_over80_bracket() {
    let mut profile = renewal_profile();
    profile.downpayment = DownpaymentBracket::LessThan20;
    let input = quote_input(profile);

    let out = compute_quotes(&input).unwrap();
    // LTV is still 60, but the stated sub-20% downpayment prices at over80.
    assert_eq!(out.result.ltv, dec!(60));
    assert_eq!(out.result.ltv_bracket, LtvBracket::Over80);

    let q = quote_for(&input, TermKey::ThreeYrFixed);
    assert_eq!(q.rate_percent, dec!(5.34));
    assert_eq!(q.lender, "First National");
}

#[test]
fn test_bracket_selection_is_monotonic_in_ltv() {
    let mut last = LtvBracket::Under65;
    let mut ltv = Decimal::ZERO;
    while ltv <= dec!(120) {
        let bracket = ltv_bracket(ltv);
        assert!(bracket >= last, "bracket regressed at ltv {ltv}");
        last = bracket;
        ltv += dec!(0.25);
    }
}

// ===========================================================================
// Missing data policy
// ===========================================================================

#[test]
fn test_missing_cell_defaults_instead_of_erroring() {
    // fourYrFixed has no under75 cell.
    let mut profile = renewal_profile();
    profile.mortgage_balance = "360000".into(); // LTV 72 → under75
    let input = quote_input(profile);

    let q = quote_for(&input, TermKey::FourYrFixed);
    assert_eq!(q.source, ResolutionSource::Defaulted);
    assert_eq!(q.rate_percent, Decimal::ZERO);
    assert_eq!(q.lender, DEFAULT_LENDER);

    let out = compute_quotes(&input).unwrap();
    assert!(out
        .warnings
        .iter()
        .any(|w| w.contains("fourYrFixed") && w.contains("default")));
}

#[test]
fn test_unpriced_province_defaults_every_term() {
    let mut profile = renewal_profile();
    profile.province = Some(mortgage_quote_core::Province::YT);
    let out = compute_quotes(&quote_input(profile)).unwrap();

    for q in &out.result.quotes {
        assert_eq!(q.source, ResolutionSource::Defaulted);
    }
    assert!(out.warnings.iter().any(|w| w.contains("YT")));
}

#[test]
fn test_unknown_property_value_prices_conservatively() {
    let mut profile = renewal_profile();
    profile.property_value = "".into();
    let out = compute_quotes(&quote_input(profile)).unwrap();
    assert_eq!(out.result.ltv, Decimal::ZERO);
    assert_eq!(out.result.ltv_bracket, LtvBracket::Over80);
}

#[test]
fn test_renewal_past_80_ltv_consults_refinance_cells() {
    // 425k on a 500k property: LTV 85 on the renewal path routes
    // the lookup through the refinance sub-map (22y → under25).
    let mut profile = renewal_profile();
    profile.mortgage_balance = "425000".into();
    let input = quote_input(profile);

    let out = compute_quotes(&input).unwrap();
    assert_eq!(out.result.ltv, dec!(85));
    assert_eq!(out.result.ltv_bracket, LtvBracket::Over80);
    assert_eq!(out.result.context, QuoteContext::StandardRenewal);
    // Still the renewal page, so still the standard 25-year schedule.
    assert_eq!(out.result.amortization_years, dec!(25));

    let q = quote_for(&input, TermKey::ThreeYrFixed);
    assert_eq!(q.rate_percent, dec!(5.09));
    assert_eq!(q.lender, "MCAP");
}

#[test]
fn test_renewal_past_80_ltv_falls_back_to_over80_cell() {
    // fourYrFixed carries no refinance sub-map; the over80 LTV cell
    // is the fallback.
    let mut profile = renewal_profile();
    profile.mortgage_balance = "425000".into();
    let q = quote_for(&quote_input(profile), TermKey::FourYrFixed);
    assert_eq!(q.source, ResolutionSource::Found);
    assert_eq!(q.rate_percent, dec!(5.24));
    assert_eq!(q.lender, "First National");
}

// ===========================================================================
// Refinance flow
// ===========================================================================

#[test]
fn test_refinance_selects_bracket_from_amortization() {
    let mut profile = renewal_profile();
    profile.path = QuotePath::Refinance;
    profile.amortization_period = dec!(22);
    let input = quote_input(profile);

    let out = compute_quotes(&input).unwrap();
    assert_eq!(out.result.context, QuoteContext::Refinance);
    assert_eq!(out.result.amortization_bracket, AmortizationBracket::Under25);
    // Refinance pages price at the borrower's stated amortization.
    assert_eq!(out.result.amortization_years, dec!(22));

    let q = quote_for(&input, TermKey::ThreeYrFixed);
    assert_eq!(q.rate_percent, dec!(5.09));
    assert_eq!(q.lender, "MCAP");
}

#[test]
fn test_refinance_over_25_years_uses_over25_cell() {
    let mut profile = renewal_profile();
    profile.path = QuotePath::Refinance;
    profile.amortization_period = dec!(28);
    let q = quote_for(&quote_input(profile), TermKey::ThreeYrFixed);
    assert_eq!(q.rate_percent, dec!(5.29));
}

#[test]
fn test_refinance_missing_bracket_falls_back_to_ltv_cell() {
    // fiveYrFixed.refinance has no over25 cell; LTV 60 → under65.
    let mut profile = renewal_profile();
    profile.path = QuotePath::Refinance;
    profile.amortization_period = dec!(28);
    let q = quote_for(&quote_input(profile), TermKey::FiveYrFixed);
    assert_eq!(q.source, ResolutionSource::Found);
    assert_eq!(q.rate_percent, dec!(4.64));
    assert_eq!(q.lender, "TD");
}

#[test]
fn test_amortization_override_clamps_to_slider_bounds() {
    let mut profile = renewal_profile();
    profile.path = QuotePath::Refinance;
    profile.amortization_period = dec!(22);
    let mut input = quote_input(profile);
    input.amortization_override = Some(dec!(45));

    let out = compute_quotes(&input).unwrap();
    assert_eq!(out.result.amortization_years, dec!(30));
}

// ===========================================================================
// Rental flow
// ===========================================================================

#[test]
fn test_rental_usage_prices_off_rental_cells() {
    let mut profile = renewal_profile();
    profile.property_usage = PropertyUsage::RentalInvestment;
    let input = quote_input(profile);

    let out = compute_quotes(&input).unwrap();
    assert_eq!(out.result.context, QuoteContext::Rental);

    // Bracketed rental on fiveYrFixed: 22y amortization → under25.
    let q = quote_for(&input, TermKey::FiveYrFixed);
    assert_eq!(q.rate_percent, dec!(5.84));
    assert_eq!(q.lender, "Home Trust");

    // Flat rental variant on threeYrFixed answers regardless of bracket.
    let q = quote_for(&input, TermKey::ThreeYrFixed);
    assert_eq!(q.rate_percent, dec!(6.04));
}

#[test]
fn test_second_home_prices_as_rental() {
    let mut profile = renewal_profile();
    profile.property_usage = PropertyUsage::SecondHome;
    let out = compute_quotes(&quote_input(profile)).unwrap();
    assert_eq!(out.result.context, QuoteContext::Rental);
}

#[test]
fn test_dedicated_rental_table_switches_pricing() {
    let profile = renewal_profile();
    let doc = sample_document();
    let input = QuoteInput {
        profile,
        rental_rates: Some(doc.rates.clone()),
        rates: doc.rates,
        prime: doc.prime,
        amortization_override: None,
    };
    let out = compute_quotes(&input).unwrap();
    assert_eq!(out.result.context, QuoteContext::Rental);
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_envelope_carries_methodology_and_metadata() {
    let out = compute_quotes(&quote_input(renewal_profile())).unwrap();
    assert!(out.methodology.contains("semi-annual"));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}
