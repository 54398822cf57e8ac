use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_quote_core::quote::display::{format_cad, NOT_AVAILABLE};
use mortgage_quote_core::quote::{monthly_payment, monthly_rate_from_semi_annual};

/// Arguments for a standalone payment computation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Principal amount
    #[arg(long, short = 'p')]
    pub principal: Decimal,

    /// Nominal annual rate in percent, compounded semi-annually
    #[arg(long, short = 'r')]
    pub rate: Decimal,

    /// Amortization in years
    #[arg(long, short = 'y')]
    pub years: Decimal,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_rate = monthly_rate_from_semi_annual(args.rate);
    let payment = monthly_payment(args.principal, args.rate, args.years);
    let display = payment
        .map(format_cad)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Ok(json!({
        "principal": args.principal,
        "nominalRatePercent": args.rate,
        "years": args.years,
        "monthlyRate": monthly_rate,
        "monthlyPayment": payment,
        "paymentDisplay": display,
    }))
}
