use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_quote_core::quote::{evaluate_gate, GateInput};

/// Arguments for the renewal-page edit gate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GateArgs {
    /// Total mortgage required as originally submitted
    #[arg(long)]
    pub original: Decimal,

    /// Total after the borrower's on-page edits
    #[arg(long)]
    pub edited: Decimal,

    /// Property value
    #[arg(long)]
    pub property_value: Decimal,
}

pub fn run_gate(args: GateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let output = evaluate_gate(&GateInput {
        original_total: args.original,
        edited_total: args.edited,
        property_value: args.property_value,
    })?;
    Ok(serde_json::to_value(output)?)
}
