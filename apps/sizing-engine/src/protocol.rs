//! Constants shared with the on-chain settlement program.
//!
//! Every value here is dictated by the program's interface description, not by
//! this crate. They live in one module so that a settlement-program upgrade is
//! a one-file change on the client.
//!
//! The settlement program independently re-derives the target price and sizing
//! from these same constants before committing a position; nothing enforces
//! that the two sides agree, so a drift between this file and the deployed
//! program is a correctness risk (see DESIGN.md).

/// Decimal places used for all USD-denominated wire values.
///
/// `$150.00` is encoded as `150_000_000`.
pub const USD_DECIMALS: u32 = 6;

/// Basis-point denominator. 1 bp = 0.01%.
pub const BASIS_POINTS: u64 = 10_000;

/// Size of the favorable target-price move, in basis points of the live price.
///
/// The target sits 10% above the current price for a long and 10% below for a
/// short. The program validates the same 10% move on-chain when the position
/// is opened.
pub const TARGET_MOVE_BPS: u64 = 1_000;

/// Minimum collateral accepted by the program, USD at [`USD_DECIMALS`] ($10).
pub const MIN_COLLATERAL_RAW: u64 = 10_000_000;

/// Maximum collateral accepted by the program, USD at [`USD_DECIMALS`] ($1,000,000).
pub const MAX_COLLATERAL_RAW: u64 = 1_000_000_000_000;

/// Minimum position notional accepted by the program ($10).
pub const MIN_POSITION_VALUE_RAW: u64 = 10_000_000;

/// Maximum position notional accepted by the program ($10,000,000).
pub const MAX_POSITION_VALUE_RAW: u64 = 10_000_000_000_000;

/// Upper bound on wire prices so the program's u64 arithmetic cannot overflow.
pub const MAX_SAFE_PRICE_RAW: u64 = u64::MAX / 200;

/// Oldest oracle publish time the program will accept, in seconds.
pub const MAX_PRICE_AGE_SECS: u64 = 60;

/// Widest oracle confidence interval the program will accept, as basis points
/// of the price (100 bps = 1%).
pub const MAX_CONFIDENCE_BPS: u64 = 100;
