use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_quote_core::quote;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Quote all five terms for a borrower profile.
/// Input: JSON-serialized `QuoteInput`. Output: the quote envelope.
#[napi]
pub fn compute_quotes(input_json: String) -> NapiResult<String> {
    let input: quote::QuoteInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = quote::compute_quotes(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Monthly payment under the semi-annual-compounding convention.
/// Input: `{ "principal": "300000", "ratePercent": "5.00", "years": "25" }`.
#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct PaymentRequest {
        principal: rust_decimal::Decimal,
        rate_percent: rust_decimal::Decimal,
        years: rust_decimal::Decimal,
    }

    let req: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = quote::monthly_payment(req.principal, req.rate_percent, req.years);
    serde_json::to_string(&serde_json::json!({ "monthlyPayment": payment }))
        .map_err(to_napi_error)
}

/// Evaluate the renewal-page 80% LTV edit gate.
/// Input: JSON-serialized `GateInput`. Output: the gate envelope.
#[napi]
pub fn evaluate_gate(input_json: String) -> NapiResult<String> {
    let input: quote::GateInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = quote::evaluate_gate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
