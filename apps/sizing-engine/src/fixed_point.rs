//! Conversions between human-readable decimals and the settlement program's
//! integer wire format.
//!
//! The program stores every amount as a `u64` with a per-field number of
//! fractional digits (USD fields at [`crate::protocol::USD_DECIMALS`], token
//! sizes at the market's token decimals). All conversions here operate on
//! [`Decimal`]'s base-10 mantissa, never on binary floats, so values that are
//! exact in decimal stay exact on the wire.
//!
//! Excess fractional digits are truncated toward zero, matching the
//! program's own integer division. Truncation, not rounding, is load-bearing:
//! a client that rounds up could encode a collateral the program rejects.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Widest scale a `Decimal` mantissa can carry.
const MAX_SCALE: u32 = 28;

/// Errors from fixed-point conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedPointError {
    /// Wire amounts are unsigned; a negative value has no encoding.
    #[error("negative value {value} has no unsigned wire encoding")]
    Negative {
        /// The rejected value.
        value: Decimal,
    },

    /// The scaled integer does not fit in the wire format.
    #[error("value {value} does not fit the wire format at {decimals} decimals")]
    Overflow {
        /// The rejected value.
        value: Decimal,
        /// Fractional digits of the target field.
        decimals: u32,
    },

    /// More fractional digits than decimal arithmetic supports.
    #[error("{decimals} fractional digits exceeds the supported maximum of {MAX_SCALE}")]
    UnsupportedScale {
        /// The requested fractional digits.
        decimals: u32,
    },

    /// The input string is not a decimal number.
    #[error("not a decimal number: {input:?}")]
    Parse {
        /// The rejected input.
        input: String,
    },
}

/// Encode a decimal value as the unique integer `trunc(value * 10^decimals)`.
///
/// Zero encodes to zero; fractional digits beyond `decimals` are truncated
/// toward zero.
pub fn to_scaled(value: Decimal, decimals: u32) -> Result<u64, FixedPointError> {
    if decimals > MAX_SCALE {
        return Err(FixedPointError::UnsupportedScale { decimals });
    }
    if value.is_zero() {
        return Ok(0);
    }
    if value.is_sign_negative() {
        return Err(FixedPointError::Negative { value });
    }

    // Drop excess fractional digits first, then shift the decimal mantissa up
    // to the target scale with pure integer arithmetic.
    let truncated = value.trunc_with_scale(decimals);
    let shift = decimals - truncated.scale();

    let raw = truncated
        .mantissa()
        .checked_mul(10_i128.pow(shift))
        .ok_or(FixedPointError::Overflow { value, decimals })?;

    u64::try_from(raw).map_err(|_| FixedPointError::Overflow { value, decimals })
}

/// Decode a wire integer back into the decimal it encodes.
pub fn from_scaled(raw: u64, decimals: u32) -> Result<Decimal, FixedPointError> {
    if decimals > MAX_SCALE {
        return Err(FixedPointError::UnsupportedScale { decimals });
    }
    Decimal::try_from_i128_with_scale(i128::from(raw), decimals)
        .map(|value| value.normalize())
        .map_err(|_| FixedPointError::Overflow {
            value: Decimal::from(raw),
            decimals,
        })
}

/// Normalize an oracle mantissa/exponent pair (`actual = mantissa * 10^expo`)
/// into a decimal.
///
/// Oracle feeds publish negative exponents for fractional prices and,
/// occasionally, positive exponents for large ones; both directions are
/// handled here so callers never shift digits themselves.
pub fn from_raw_exponent(mantissa: i64, expo: i32) -> Result<Decimal, FixedPointError> {
    if expo <= 0 {
        let decimals = expo.unsigned_abs();
        if decimals > MAX_SCALE {
            return Err(FixedPointError::UnsupportedScale { decimals });
        }
        Decimal::try_from_i128_with_scale(i128::from(mantissa), decimals)
            .map(|value| value.normalize())
            .map_err(|_| FixedPointError::Overflow {
                value: Decimal::from(mantissa),
                decimals,
            })
    } else {
        let decimals = expo.unsigned_abs();
        if decimals > MAX_SCALE {
            return Err(FixedPointError::UnsupportedScale { decimals });
        }
        let shifted = i128::from(mantissa)
            .checked_mul(10_i128.pow(decimals))
            .ok_or(FixedPointError::Overflow {
                value: Decimal::from(mantissa),
                decimals,
            })?;
        Decimal::try_from_i128_with_scale(shifted, 0).map_err(|_| FixedPointError::Overflow {
            value: Decimal::from(mantissa),
            decimals,
        })
    }
}

/// Parse a decimal from a string, accepting scientific notation.
///
/// Inputs like `"1.505e2"` are normalized before any digit shifting, so a
/// caller feeding UI or JSON strings through [`to_scaled`] gets the same
/// integer regardless of notation.
pub fn parse_decimal(input: &str) -> Result<Decimal, FixedPointError> {
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| FixedPointError::Parse {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn encodes_usd_price_at_six_decimals() {
        assert_eq!(to_scaled(dec!(150.5), 6), Ok(150_500_000));
    }

    #[test]
    fn round_trips_exactly() {
        let raw = to_scaled(dec!(150.5), 6).unwrap();
        assert_eq!(from_scaled(raw, 6).unwrap(), dec!(150.5));
    }

    #[test]
    fn truncates_excess_digits_toward_zero() {
        // 1.9999999 at 6 decimals keeps 1.999999, it does not round to 2.
        assert_eq!(to_scaled(dec!(1.9999999), 6), Ok(1_999_999));
        assert_eq!(to_scaled(dec!(0.0000009), 6), Ok(0));
    }

    #[test]
    fn zero_encodes_to_zero() {
        assert_eq!(to_scaled(Decimal::ZERO, 6), Ok(0));
        assert_eq!(to_scaled(Decimal::ZERO, 0), Ok(0));
    }

    #[test]
    fn integer_values_shift_cleanly() {
        assert_eq!(to_scaled(dec!(65000), 6), Ok(65_000_000_000));
        assert_eq!(to_scaled(dec!(1), 8), Ok(100_000_000));
    }

    #[test]
    fn rejects_negative_values() {
        assert!(matches!(
            to_scaled(dec!(-1.5), 6),
            Err(FixedPointError::Negative { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_values() {
        // u64::MAX at 6 decimals is ~1.8e13 USD; 1e15 cannot fit.
        assert!(matches!(
            to_scaled(dec!(1_000_000_000_000_000), 6),
            Err(FixedPointError::Overflow { .. })
        ));
    }

    #[test]
    fn rejects_unsupported_scale() {
        assert!(matches!(
            to_scaled(dec!(1), 29),
            Err(FixedPointError::UnsupportedScale { decimals: 29 })
        ));
    }

    #[test]
    fn normalizes_pyth_style_exponents() {
        // price=15000000000, expo=-8 is $150
        assert_eq!(from_raw_exponent(15_000_000_000, -8).unwrap(), dec!(150));
        assert_eq!(from_raw_exponent(150, 0).unwrap(), dec!(150));
        assert_eq!(from_raw_exponent(15, 1).unwrap(), dec!(150));
        assert_eq!(from_raw_exponent(-5, -1).unwrap(), dec!(-0.5));
    }

    #[test]
    fn parses_scientific_notation() {
        assert_eq!(parse_decimal("150.5").unwrap(), dec!(150.5));
        assert_eq!(parse_decimal("1.505e2").unwrap(), dec!(150.5));
        assert_eq!(parse_decimal("6.5e4").unwrap(), dec!(65000));
        assert!(matches!(
            parse_decimal("not-a-number"),
            Err(FixedPointError::Parse { .. })
        ));
    }

    #[test]
    fn decodes_token_sizes_at_token_decimals() {
        // 3.5 tokens with 8 token decimals
        assert_eq!(from_scaled(350_000_000, 8).unwrap(), dec!(3.5));
    }
}
