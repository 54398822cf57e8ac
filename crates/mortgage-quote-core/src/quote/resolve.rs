//! Rate cell resolution: which cell prices a given term, and an
//! explicit record of whether the table actually had it.
//!
//! Missing data never errors here. Every miss resolves to the
//! defaulted cell so the quote surface stays renderable (the admin
//! table is routinely incomplete mid-edit).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quote::brackets::QuoteContext;
use crate::rate_table::{RateCell, RateTable, TermRates};
use crate::types::{AmortizationBracket, LtvBracket, Money, Percent, Province, TermKey};

/// Where a resolved cell came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// The table priced this lookup (directly or via the documented
    /// refinance-to-LTV fallback).
    Found,
    /// Nothing in the table; the zero-rate default cell was used.
    Defaulted,
}

/// A resolved cell tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub cell: RateCell,
    pub source: ResolutionSource,
}

impl Resolution {
    fn found(cell: &RateCell) -> Self {
        Self {
            cell: cell.clone(),
            source: ResolutionSource::Found,
        }
    }

    fn defaulted() -> Self {
        Self {
            cell: RateCell::defaulted(),
            source: ResolutionSource::Defaulted,
        }
    }
}

/// Everything bracket selection already decided, bundled for lookup.
#[derive(Debug, Clone, Copy)]
pub struct CellQuery {
    pub context: QuoteContext,
    pub ltv_bracket: LtvBracket,
    pub amortization_bracket: AmortizationBracket,
    pub total_mortgage_required: Money,
    /// Computed LTV crossed the 80% threshold. In the general
    /// renewal flow this is what routes the lookup through the
    /// refinance sub-map.
    pub ltv_exceeds_threshold: bool,
}

/// Resolve one term's cell out of a province's pricing.
pub fn resolve_cell(term_rates: &TermRates, query: &CellQuery) -> Resolution {
    if query.context == QuoteContext::Rental {
        return term_rates
            .rental_cell(query.amortization_bracket)
            .map(Resolution::found)
            .unwrap_or_else(Resolution::defaulted);
    }

    // The dedicated refinance flow always prices off the refinance
    // sub-map; the renewal flow consults it once computed LTV passes
    // 80%. Either way there must be something to borrow, and the LTV
    // cell stays the fallback.
    let refinance_pricing =
        query.context == QuoteContext::Refinance || query.ltv_exceeds_threshold;
    if refinance_pricing && query.total_mortgage_required > Decimal::ZERO {
        return term_rates
            .refinance_cell(query.amortization_bracket)
            .or_else(|| term_rates.ltv_cell(query.ltv_bracket))
            .map(Resolution::found)
            .unwrap_or_else(Resolution::defaulted);
    }

    // Refinance with nothing to borrow quotes like a renewal.
    term_rates
        .ltv_cell(query.ltv_bracket)
        .map(Resolution::found)
        .unwrap_or_else(Resolution::defaulted)
}

/// Resolve one term for a province out of the full table. An
/// unpriced province resolves every term to the default cell.
pub fn resolve_term(
    table: &RateTable,
    province: Province,
    term: TermKey,
    query: &CellQuery,
) -> Resolution {
    match table.province(province) {
        Some(province_rates) => resolve_cell(province_rates.term(term), query),
        None => Resolution::defaulted(),
    }
}

/// The percentage a resolved cell actually quotes at. Fixed cells
/// carry it directly; variable cells are prime plus the stored
/// adjustment, floored at zero.
pub fn effective_percent(term: TermKey, cell: &RateCell, prime: Percent) -> Percent {
    if term.is_variable() {
        (prime + cell.rate).max(Decimal::ZERO)
    } else {
        cell.rate
    }
}
