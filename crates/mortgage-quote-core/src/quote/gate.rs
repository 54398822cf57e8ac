//! The renewal-page edit gate.
//!
//! A borrower who *edits* their balance or borrow amount on the
//! quote page past 80% LTV gets a remediation message instead of
//! quotes. A submission that arrived high-LTV in the first place
//! still quotes, off the over80 bracket — the gate only fires on a
//! real change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::quote::brackets::ltv_exceeds_refinance_threshold;
use crate::quote::profile::loan_to_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::QuoteResult;

/// Edits of a dollar or less are rounding noise, not a real change.
pub const EDIT_TOLERANCE: Decimal = dec!(1);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateInput {
    /// Total mortgage required as originally submitted.
    pub original_total: Money,
    /// Total after the borrower's on-page edits.
    pub edited_total: Money,
    pub property_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateOutput {
    pub blocked: bool,
    pub edited_ltv: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// True iff the edited total crosses 80% of property value AND the
/// edit is a real change (more than [`EDIT_TOLERANCE`] away from the
/// original submission).
pub fn should_block_rates(
    original_total: Money,
    edited_total: Money,
    property_value: Money,
) -> bool {
    let edited_ltv = loan_to_value(edited_total, property_value);
    let changed = (edited_total - original_total).abs() > EDIT_TOLERANCE;
    ltv_exceeds_refinance_threshold(edited_ltv) && changed
}

/// Envelope wrapper for the CLI and bindings surfaces.
pub fn evaluate_gate(input: &GateInput) -> QuoteResult<ComputationOutput<GateOutput>> {
    let start = Instant::now();

    let edited_ltv = loan_to_value(input.edited_total, input.property_value);
    let blocked = should_block_rates(input.original_total, input.edited_total, input.property_value);
    let message = blocked.then(|| {
        "The amount you want to borrow is more than 80% of your property value. \
         Lower the amount you want to borrow, or speak to an advisor about \
         refinancing options."
            .to_string()
    });

    let output = GateOutput {
        blocked,
        edited_ltv: edited_ltv.round_dp(2),
        message,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "80% LTV edit gate with $1 change tolerance",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_edit_past_80_percent_blocks() {
        // Originally 70% LTV, edited to 85%.
        assert!(should_block_rates(dec!(350000), dec!(425000), dec!(500000)));
    }

    #[test]
    fn rounding_noise_does_not_block() {
        // 85% LTV but the "edit" moved the total by under a dollar.
        assert!(!should_block_rates(dec!(425000.40), dec!(425000.90), dec!(500000)));
    }

    #[test]
    fn unedited_high_ltv_still_quotes() {
        assert!(!should_block_rates(dec!(425000), dec!(425000), dec!(500000)));
    }

    #[test]
    fn edit_below_threshold_does_not_block() {
        assert!(!should_block_rates(dec!(300000), dec!(390000), dec!(500000)));
    }

    #[test]
    fn gate_output_carries_remediation_message() {
        let out = evaluate_gate(&GateInput {
            original_total: dec!(350000),
            edited_total: dec!(425000),
            property_value: dec!(500000),
        })
        .unwrap();
        assert!(out.result.blocked);
        assert_eq!(out.result.edited_ltv, dec!(85));
        assert!(out.result.message.is_some());
    }
}
