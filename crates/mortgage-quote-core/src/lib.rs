pub mod error;
pub mod quote;
pub mod rate_table;
pub mod types;

pub use error::QuoteError;
pub use types::*;

/// Standard result type for all quote-engine operations.
pub type QuoteResult<T> = Result<T, QuoteError>;
