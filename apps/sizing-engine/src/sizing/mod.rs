//! Position sizing for the open-position flow.
//!
//! Pure, synchronous, and free of shared state: the UI recomputes on every
//! input change without debouncing. The settlement program re-derives the
//! same relationship on-chain before committing anything, so results here are
//! advisory.

mod calculator;
mod types;

pub use calculator::{size_position, target_price};
pub use types::{
    Direction, DerivedPosition, InvalidReason, MarketQuote, PositionRequest, SizingOutcome,
};
