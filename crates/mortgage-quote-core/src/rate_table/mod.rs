//! Stored rate-table data model and its normalization boundary.

pub mod cell;
pub mod table;

pub use cell::{RateCell, DEFAULT_LENDER};
pub use table::{
    BracketedRates, ProvinceRates, RateTable, RateTableDocument, RentalRates, TermRates,
};
