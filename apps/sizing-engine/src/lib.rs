// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Sizing Engine - Rust Core Library
//!
//! Client-side engine for the Regret Markets retroactive-entry protocol. The
//! settlement program (external, on-chain) owns all account state and
//! re-validates every derivation; this crate is the advisory half the client
//! runs locally:
//!
//! - [`sizing`]: the retroactive-entry calculator. Given a live quote and the
//!   entry the user wishes they had made, back-solve the real position whose
//!   payoff at a fixed target price replicates the imagined one. Pure and
//!   synchronous; safe to re-run on every keystroke.
//! - [`fixed_point`]: decimal ↔ integer wire-format conversion, truncating
//!   and exact in base 10.
//! - [`protocol`]: the constants shared with the program interface, defined
//!   once.
//! - [`wire`] / [`limits`]: `open_position` argument encoding and the
//!   pre-flight pass mirroring the program's input validation.
//! - [`feed`]: oracle price port, Hermes HTTP adapter, and a cancellable
//!   polling task that keeps a fresh validated quote available.
//! - [`config`] / [`telemetry`]: YAML configuration and tracing setup.
//!
//! Wallets, transaction signing, and account fetching live in the host
//! application; nothing here performs I/O except the [`feed`] adapters.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Engine configuration loading and validation.
pub mod config;

/// Oracle price feed port, adapter, and poller.
pub mod feed;

/// Decimal ↔ fixed-point wire conversions.
pub mod fixed_point;

/// Client-side mirror of the program's input limits.
pub mod limits;

/// Constants shared with the settlement program interface.
pub mod protocol;

/// The retroactive-entry position sizing calculator.
pub mod sizing;

/// Tracing subscriber setup.
pub mod telemetry;

/// Wire encoding and pre-flight validation for `open_position`.
pub mod wire;

pub use config::{
    ConfigError, EngineConfig, FeedConfig, LimitsConfig, load_config, validate_config,
};
pub use feed::{FeedError, HermesOracle, PriceOraclePort, PricePoller, PriceUpdate};
pub use fixed_point::FixedPointError;
pub use limits::LimitError;
pub use sizing::{
    Direction, DerivedPosition, InvalidReason, MarketQuote, PositionRequest, SizingOutcome,
    size_position, target_price,
};
pub use wire::{OpenPositionArgs, PreflightError, preflight_open_position};
