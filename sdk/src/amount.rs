//! Decimal <-> fixed-point amount conversion
//!
//! The program stores every quantity as an unsigned integer scaled by
//! `10^decimals`. Conversions toward the integer side stay in u128 arithmetic
//! the whole way; floats appear only on the display side.

use crate::error::{ClientError, Result};

/// Convert a decimal string to its fixed-point representation, truncating
/// toward zero at `decimals` fractional digits.
///
/// Negative, signed, or otherwise malformed input is `InvalidInput`.
pub fn to_fixed_point(amount: &str, decimals: u8) -> Result<u128> {
    let amount = amount.trim();
    if amount.is_empty() || amount == "." {
        return Err(ClientError::InvalidInput);
    }
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (amount, ""),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ClientError::InvalidInput);
    }

    let scale = 10u128
        .checked_pow(u32::from(decimals))
        .ok_or(ClientError::InvalidInput)?;
    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| ClientError::InvalidInput)?
    };

    // digits beyond the mint precision are dropped, never rounded up
    let kept = &frac_part[..frac_part.len().min(usize::from(decimals))];
    let frac_value: u128 = if kept.is_empty() {
        0
    } else {
        let digits: u128 = kept.parse().map_err(|_| ClientError::InvalidInput)?;
        digits * 10u128.pow(u32::from(decimals) - kept.len() as u32)
    };

    int_value
        .checked_mul(scale)
        .and_then(|value| value.checked_add(frac_value))
        .ok_or(ClientError::InvalidInput)
}

/// Same as [`to_fixed_point`] but narrowed to the u64 the program carries
/// on the wire.
pub fn to_fixed_point_u64(amount: &str, decimals: u8) -> Result<u64> {
    u64::try_from(to_fixed_point(amount, decimals)?).map_err(|_| ClientError::InvalidInput)
}

/// Convert a fixed-point amount back to its decimal value.
pub fn to_decimal(amount: u128, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(i32::from(decimals))
}

/// Render a fixed-point amount as an exact decimal string.
pub fn format_fixed_point(amount: u128, decimals: u8) -> String {
    let scale = 10u128.pow(u32::from(decimals));
    if decimals == 0 {
        return amount.to_string();
    }
    format!(
        "{}.{:0width$}",
        amount / scale,
        amount % scale,
        width = usize::from(decimals)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(to_fixed_point("5", 9).unwrap(), 5_000_000_000);
        assert_eq!(to_fixed_point("1000", 0).unwrap(), 1000);
    }

    #[test]
    fn parses_fractions_with_truncation() {
        assert_eq!(to_fixed_point("1.5", 9).unwrap(), 1_500_000_000);
        assert_eq!(to_fixed_point("0.123456789", 6).unwrap(), 123_456);
        assert_eq!(to_fixed_point(".25", 2).unwrap(), 25);
        assert_eq!(to_fixed_point("3.", 2).unwrap(), 300);
    }

    #[test]
    fn zero_converts_to_zero_both_directions() {
        assert_eq!(to_fixed_point("0", 9).unwrap(), 0);
        assert_eq!(to_fixed_point("0.000", 9).unwrap(), 0);
        assert_eq!(to_decimal(0, 9), 0.0);
    }

    #[test]
    fn rejects_negative_and_malformed_input() {
        for bad in ["-1", "-0.5", "+2", "", ".", "1.2.3", "abc", "1e9", " - "] {
            assert_eq!(to_fixed_point(bad, 9), Err(ClientError::InvalidInput), "{bad}");
        }
    }

    #[test]
    fn supports_values_wider_than_u64() {
        // 10^30 does not fit a u64 but must convert without precision loss
        let value = to_fixed_point("1000000000000000000000", 9).unwrap();
        assert_eq!(value, 10u128.pow(30));
        assert_eq!(
            to_fixed_point_u64("1000000000000000000000", 9),
            Err(ClientError::InvalidInput)
        );
    }

    #[test]
    fn round_trips_integer_amounts_exactly() {
        for x in [0u128, 1, 999, 1_000_000_000, u64::MAX as u128, 10u128.pow(25)] {
            for decimals in [0u8, 6, 9] {
                let rendered = format_fixed_point(x, decimals);
                assert_eq!(to_fixed_point(&rendered, decimals).unwrap(), x);
            }
        }
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let huge = "3".repeat(40);
        assert_eq!(to_fixed_point(&huge, 9), Err(ClientError::InvalidInput));
    }
}
