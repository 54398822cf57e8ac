//! Rate resolution and payment computation for borrower quotes.

pub mod brackets;
pub mod display;
pub mod engine;
pub mod gate;
pub mod payment;
pub mod profile;
pub mod resolve;

pub use brackets::QuoteContext;
pub use engine::{compute_quotes, QuoteInput, QuoteOutput, RateQuote};
pub use gate::{evaluate_gate, should_block_rates, GateInput, GateOutput};
pub use payment::{monthly_payment, monthly_rate_from_semi_annual};
pub use profile::{parse_money, BorrowerProfile};
pub use resolve::{Resolution, ResolutionSource};
