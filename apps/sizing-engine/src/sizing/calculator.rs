//! The retroactive-entry sizing calculator.
//!
//! Given a live quote and the entry the user wishes they had made, solve for
//! the real position that replicates the imagined payoff.
//!
//! Derivation: pick a target price a fixed move away from the live price
//! (favorable to the direction). The imagined trade's profit at that target is
//! `desired_size * (target - desired_entry)`; a real entry at the live price
//! earns `actual_size * (target - current)`. Setting the two equal:
//!
//! ```text
//! actual_size = desired_size * (target - desired_entry) / (target - current)
//! ```
//!
//! (mirrored for shorts). Leverage falls out as notional over collateral.
//!
//! The function is pure and allocation-free; callers re-run it on every
//! keystroke and rely on identical inputs producing identical output.

use rust_decimal::Decimal;

use crate::protocol::{BASIS_POINTS, TARGET_MOVE_BPS};

use super::types::{Direction, DerivedPosition, InvalidReason, MarketQuote, PositionRequest, SizingOutcome};

/// The target price for a direction: the live price moved
/// [`TARGET_MOVE_BPS`] in the favorable direction (up for long, down for
/// short).
///
/// Returns `None` only on decimal overflow.
#[must_use]
pub fn target_price(current_price: Decimal, direction: Direction) -> Option<Decimal> {
    let numerator = match direction {
        Direction::Long => BASIS_POINTS + TARGET_MOVE_BPS,
        Direction::Short => BASIS_POINTS - TARGET_MOVE_BPS,
    };
    let multiplier = Decimal::from(numerator) / Decimal::from(BASIS_POINTS);
    current_price.checked_mul(multiplier)
}

/// Derive the position for a request against a quote.
///
/// Returns [`SizingOutcome::Invalid`] for non-positive inputs, for the wrong
/// price ordering (long needs `current > desired_entry`, short the reverse),
/// and for any degenerate arithmetic. An invalid outcome carries no partial
/// fields; [`SizingOutcome::derived`] yields the zeroed marker.
#[must_use]
pub fn size_position(quote: &MarketQuote, request: &PositionRequest) -> SizingOutcome {
    let current = quote.current_price;

    if current <= Decimal::ZERO
        || request.desired_entry_price <= Decimal::ZERO
        || request.desired_size <= Decimal::ZERO
        || request.collateral <= Decimal::ZERO
    {
        return SizingOutcome::Invalid(InvalidReason::Input);
    }

    let ordered = match request.direction {
        Direction::Long => current > request.desired_entry_price,
        Direction::Short => current < request.desired_entry_price,
    };
    if !ordered {
        return SizingOutcome::Invalid(InvalidReason::PriceRelationship);
    }

    derive(current, request).map_or(
        SizingOutcome::Invalid(InvalidReason::Arithmetic),
        SizingOutcome::Valid,
    )
}

fn derive(current: Decimal, request: &PositionRequest) -> Option<DerivedPosition> {
    let target = target_price(current, request.direction)?;

    // Per-token payoff of the imagined entry, and of a real entry at the
    // live price, both measured at the target.
    let (target_gap, price_move) = match request.direction {
        Direction::Long => (
            target.checked_sub(request.desired_entry_price)?,
            target.checked_sub(current)?,
        ),
        Direction::Short => (
            request.desired_entry_price.checked_sub(target)?,
            current.checked_sub(target)?,
        ),
    };
    if price_move <= Decimal::ZERO {
        return None;
    }

    let actual_size = request
        .desired_size
        .checked_mul(target_gap)?
        .checked_div(price_move)?;
    let position_value = actual_size.checked_mul(current)?;
    let leverage = position_value.checked_div(request.collateral)?;

    let derived = DerivedPosition {
        target_price: target,
        actual_size,
        position_value,
        leverage,
    };

    let all_positive = derived.target_price > Decimal::ZERO
        && derived.actual_size > Decimal::ZERO
        && derived.position_value > Decimal::ZERO
        && derived.leverage > Decimal::ZERO;
    all_positive.then_some(derived)
}
