//! Encoding of a sizing request into the settlement program's
//! `open_position` arguments, plus the pre-flight pass that mirrors the
//! program's own validation order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fixed_point::{self, FixedPointError};
use crate::limits::{self, LimitError};
use crate::protocol::USD_DECIMALS;
use crate::sizing::{
    self, DerivedPosition, InvalidReason, MarketQuote, PositionRequest, SizingOutcome,
};

/// Integer argument tuple for the program's `open_position` instruction.
///
/// USD fields are scaled to [`USD_DECIMALS`]; the size is scaled to the
/// market's token decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPositionArgs {
    /// Imagined size, token wire units.
    pub desired_size: u64,
    /// Imagined entry price, USD wire units.
    pub desired_entry_price: u64,
    /// Collateral to lock, USD wire units.
    pub collateral: u64,
    /// Trade direction flag as the program encodes it.
    pub long: bool,
}

impl OpenPositionArgs {
    /// Encode a request against a quote's token decimals.
    pub fn encode(quote: &MarketQuote, request: &PositionRequest) -> Result<Self, FixedPointError> {
        Ok(Self {
            desired_size: fixed_point::to_scaled(request.desired_size, quote.token_decimals)?,
            desired_entry_price: fixed_point::to_scaled(request.desired_entry_price, USD_DECIMALS)?,
            collateral: fixed_point::to_scaled(request.collateral, USD_DECIMALS)?,
            long: request.direction.is_long(),
        })
    }
}

/// A leverage ratio as the program's basis-point integer, truncated the way
/// the program's integer division truncates.
pub fn leverage_bps(leverage: Decimal) -> Result<u64, FixedPointError> {
    // Basis points are a scale-4 fixed-point encoding of the ratio.
    fixed_point::to_scaled(leverage, 4)
}

/// Why a pre-flight pass rejected a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    /// The request does not derive a valid position at all.
    #[error("request does not derive a valid position ({reason:?})")]
    InvalidSizing {
        /// The calculator's rejection reason.
        reason: InvalidReason,
    },

    /// A decimal value has no wire encoding.
    #[error(transparent)]
    Encoding(#[from] FixedPointError),

    /// The program would reject the request on a limit.
    #[error(transparent)]
    Limit(#[from] LimitError),
}

/// Size, encode, and limit-check a request exactly the way the program will.
///
/// Checks run in the program's order: raw inputs first, derived values after
/// sizing. Success returns the instruction arguments together with the
/// derived position for display.
pub fn preflight_open_position(
    quote: &MarketQuote,
    request: &PositionRequest,
    max_leverage_bps: u64,
) -> Result<(OpenPositionArgs, DerivedPosition), PreflightError> {
    let derived = match sizing::size_position(quote, request) {
        SizingOutcome::Valid(derived) => derived,
        SizingOutcome::Invalid(reason) => return Err(PreflightError::InvalidSizing { reason }),
    };

    let args = OpenPositionArgs::encode(quote, request)?;
    limits::validate_collateral(args.collateral)?;
    limits::validate_size(args.desired_size)?;
    limits::validate_price(args.desired_entry_price)?;
    limits::validate_price(fixed_point::to_scaled(quote.current_price, USD_DECIMALS)?)?;

    limits::validate_position_value(fixed_point::to_scaled(
        derived.position_value,
        USD_DECIMALS,
    )?)?;
    limits::validate_size(fixed_point::to_scaled(
        derived.actual_size,
        quote.token_decimals,
    )?)?;
    limits::validate_leverage(leverage_bps(derived.leverage)?, max_leverage_bps)?;

    Ok((args, derived))
}
