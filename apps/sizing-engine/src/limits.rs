//! Client-side mirror of the settlement program's input limits.
//!
//! The program enforces all of these again on-chain; mirroring them lets the
//! UI reject a request before asking the wallet to sign it. Checks operate on
//! wire-format integers so they see exactly what the program will see.

use thiserror::Error;

use crate::protocol::{
    MAX_COLLATERAL_RAW, MAX_POSITION_VALUE_RAW, MAX_SAFE_PRICE_RAW, MIN_COLLATERAL_RAW,
    MIN_POSITION_VALUE_RAW,
};

/// A limit the settlement program would reject the request for.
///
/// Variants carry the wire-format values so messages read in the program's
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimitError {
    /// Collateral below the program minimum.
    #[error("collateral {raw} below program minimum {min}")]
    CollateralTooLow {
        /// Offered collateral, wire units.
        raw: u64,
        /// Program minimum, wire units.
        min: u64,
    },

    /// Collateral above the program maximum.
    #[error("collateral {raw} above program maximum {max}")]
    CollateralTooHigh {
        /// Offered collateral, wire units.
        raw: u64,
        /// Program maximum, wire units.
        max: u64,
    },

    /// Position notional below the program minimum.
    #[error("position value {raw} below program minimum {min}")]
    PositionValueTooLow {
        /// Derived notional, wire units.
        raw: u64,
        /// Program minimum, wire units.
        min: u64,
    },

    /// Position notional above the program maximum.
    #[error("position value {raw} above program maximum {max}")]
    PositionValueTooHigh {
        /// Derived notional, wire units.
        raw: u64,
        /// Program maximum, wire units.
        max: u64,
    },

    /// Price is zero or large enough to overflow program arithmetic.
    #[error("price {raw} outside the program's safe range")]
    PriceOutOfRange {
        /// Offending price, wire units.
        raw: u64,
    },

    /// Sizes must be non-zero on the wire.
    #[error("position size must be non-zero")]
    SizeZero,

    /// Implied leverage exceeds the configured cap.
    #[error("leverage {leverage_bps} bps exceeds the {max_bps} bps cap")]
    LeverageTooHigh {
        /// Implied leverage, basis points.
        leverage_bps: u64,
        /// Configured cap, basis points.
        max_bps: u64,
    },
}

/// Validate collateral against the program's bounds.
pub const fn validate_collateral(raw: u64) -> Result<(), LimitError> {
    if raw < MIN_COLLATERAL_RAW {
        return Err(LimitError::CollateralTooLow {
            raw,
            min: MIN_COLLATERAL_RAW,
        });
    }
    if raw > MAX_COLLATERAL_RAW {
        return Err(LimitError::CollateralTooHigh {
            raw,
            max: MAX_COLLATERAL_RAW,
        });
    }
    Ok(())
}

/// Validate a position notional against the program's bounds.
pub const fn validate_position_value(raw: u64) -> Result<(), LimitError> {
    if raw < MIN_POSITION_VALUE_RAW {
        return Err(LimitError::PositionValueTooLow {
            raw,
            min: MIN_POSITION_VALUE_RAW,
        });
    }
    if raw > MAX_POSITION_VALUE_RAW {
        return Err(LimitError::PositionValueTooHigh {
            raw,
            max: MAX_POSITION_VALUE_RAW,
        });
    }
    Ok(())
}

/// Validate a wire price: non-zero and below the program's overflow guard.
pub const fn validate_price(raw: u64) -> Result<(), LimitError> {
    if raw == 0 || raw > MAX_SAFE_PRICE_RAW {
        return Err(LimitError::PriceOutOfRange { raw });
    }
    Ok(())
}

/// Validate a wire size is non-zero.
pub const fn validate_size(raw: u64) -> Result<(), LimitError> {
    if raw == 0 {
        return Err(LimitError::SizeZero);
    }
    Ok(())
}

/// Validate implied leverage against the configured cap.
pub const fn validate_leverage(leverage_bps: u64, max_bps: u64) -> Result<(), LimitError> {
    if leverage_bps > max_bps {
        return Err(LimitError::LeverageTooHigh {
            leverage_bps,
            max_bps,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(10_000_000 => true; "at the ten dollar minimum")]
    #[test_case(9_999_999 => false; "one unit under the minimum")]
    #[test_case(1_000_000_000_000 => true; "at the million dollar maximum")]
    #[test_case(1_000_000_000_001 => false; "one unit over the maximum")]
    fn collateral_bounds(raw: u64) -> bool {
        validate_collateral(raw).is_ok()
    }

    #[test_case(10_000_000 => true; "at the minimum notional")]
    #[test_case(9_999_999 => false; "under the minimum notional")]
    #[test_case(10_000_000_000_000 => true; "at the maximum notional")]
    #[test_case(10_000_000_000_001 => false; "over the maximum notional")]
    fn position_value_bounds(raw: u64) -> bool {
        validate_position_value(raw).is_ok()
    }

    #[test]
    fn price_range_excludes_zero_and_overflow_territory() {
        assert_eq!(validate_price(0), Err(LimitError::PriceOutOfRange { raw: 0 }));
        assert!(validate_price(1).is_ok());
        assert!(validate_price(MAX_SAFE_PRICE_RAW).is_ok());
        assert!(validate_price(MAX_SAFE_PRICE_RAW + 1).is_err());
    }

    #[test]
    fn size_must_be_non_zero() {
        assert_eq!(validate_size(0), Err(LimitError::SizeZero));
        assert!(validate_size(1).is_ok());
    }

    #[test]
    fn leverage_cap_is_inclusive() {
        assert!(validate_leverage(70_000, 70_000).is_ok());
        assert_eq!(
            validate_leverage(70_001, 70_000),
            Err(LimitError::LeverageTooHigh {
                leverage_bps: 70_001,
                max_bps: 70_000
            })
        );
    }
}
