//! Value types for the open-position sizing flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Profits when the price rises.
    Long,
    /// Profits when the price falls.
    Short,
}

impl Direction {
    /// Check if this is the long direction.
    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, Self::Long)
    }
}

/// A live market quote supplied by the caller.
///
/// Freshness is the caller's problem: the calculator treats whatever price it
/// is handed as current (see [`crate::feed`] for the polling side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Market pair, e.g. `"BTC/USD"`.
    pub pair: String,
    /// Live price in USD.
    pub current_price: Decimal,
    /// Decimal places of the market's base token (8 for BTC, 18 for ETH).
    pub token_decimals: u32,
}

impl MarketQuote {
    /// Create a new market quote.
    #[must_use]
    pub fn new(pair: impl Into<String>, current_price: Decimal, token_decimals: u32) -> Self {
        Self {
            pair: pair.into(),
            current_price,
            token_decimals,
        }
    }
}

/// The entry the user wishes they had made.
///
/// None of these values are ever executed as-is; the calculator back-solves a
/// real position whose payoff at the target price replicates this imagined one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequest {
    /// Trade direction.
    pub direction: Direction,
    /// The price the user imagines having entered at, USD.
    pub desired_entry_price: Decimal,
    /// Nominal size the user imagines having traded, in tokens.
    pub desired_size: Decimal,
    /// USD collateral the user will lock.
    pub collateral: Decimal,
}

/// The position the calculator derived.
///
/// Either all four fields are strictly positive or the whole value is
/// [`DerivedPosition::ZERO`]; no partially-populated state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPosition {
    /// Hypothetical future price the sizing is solved against, USD.
    pub target_price: Decimal,
    /// Real position size that replicates the requested payoff, in tokens.
    pub actual_size: Decimal,
    /// Notional value at the current price, USD.
    pub position_value: Decimal,
    /// Position value over collateral.
    pub leverage: Decimal,
}

impl DerivedPosition {
    /// The fully-zeroed invalid marker.
    pub const ZERO: Self = Self {
        target_price: Decimal::ZERO,
        actual_size: Decimal::ZERO,
        position_value: Decimal::ZERO,
        leverage: Decimal::ZERO,
    };
}

/// Why a sizing request was rejected.
///
/// Both states occur routinely while a user is typing into the form; neither
/// is a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    /// A numeric input was missing, zero, or negative.
    Input,
    /// The directional ordering between live and desired entry price is wrong
    /// (long needs `current > desired`, short needs `current < desired`).
    PriceRelationship,
    /// An intermediate value overflowed or degenerated to zero.
    Arithmetic,
}

/// Result of a sizing computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingOutcome {
    /// All four derived fields are strictly positive.
    Valid(DerivedPosition),
    /// The inputs cannot yield a position; derived fields are all zero.
    Invalid(InvalidReason),
}

impl SizingOutcome {
    /// Check whether a position was derived.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The derived position, or the zeroed marker when invalid.
    #[must_use]
    pub const fn derived(&self) -> DerivedPosition {
        match self {
            Self::Valid(derived) => *derived,
            Self::Invalid(_) => DerivedPosition::ZERO,
        }
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(reason) => Some(*reason),
        }
    }
}
