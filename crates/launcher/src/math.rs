use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{LaunchError, LaunchResult};

/// Parse a human-readable supply. Must be a plain positive decimal number
/// that fits in a `Decimal` without rounding.
pub fn parse_supply(input: &str) -> LaunchResult<Decimal> {
    let input = input.trim();
    let supply = Decimal::from_str_exact(input).map_err(|e| {
        LaunchError::Validation(format!("'{}' is not a usable supply: {}", input, e))
    })?;
    if supply <= Decimal::ZERO {
        return Err(LaunchError::Validation(
            "Supply must be greater than zero".to_string(),
        ));
    }
    Ok(supply)
}

/// Convert a supply into base units: floor(supply * 10^decimals).
///
/// The scaling is exact decimal arithmetic, so 0.29 at 2 decimals is 29 and
/// not 28. Results that do not fit in a u64 are rejected.
pub fn to_base_units(supply: Decimal, decimals: u8) -> LaunchResult<u64> {
    if supply.is_sign_negative() {
        return Err(LaunchError::Validation(
            "Supply must not be negative".to_string(),
        ));
    }

    let overflow = || {
        LaunchError::Validation(format!(
            "Supply {} with {} decimals exceeds the maximum of {} base units",
            supply,
            decimals,
            u64::MAX
        ))
    };

    let mut scaled = supply;
    for _ in 0..decimals {
        scaled = scaled.checked_mul(Decimal::TEN).ok_or_else(overflow)?;
    }

    scaled.floor().to_u64().ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_launch_amount() {
        let amount = to_base_units(dec("1000000000"), 6).unwrap();
        assert_eq!(amount, 1_000_000_000_000_000);
    }

    #[test]
    fn test_fraction_is_floored() {
        assert_eq!(to_base_units(dec("1.999"), 2).unwrap(), 199);
        assert_eq!(to_base_units(dec("0.5"), 0).unwrap(), 0);
        assert_eq!(to_base_units(dec("12.3456789"), 4).unwrap(), 123_456);
    }

    #[test]
    fn test_exact_decimal_scaling() {
        // 0.29 * 100 is 28.999999999999996 in binary floating point
        assert_eq!(to_base_units(dec("0.29"), 2).unwrap(), 29);
        assert_eq!(to_base_units(dec("0.1"), 9).unwrap(), 100_000_000);
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(to_base_units(dec("42"), 0).unwrap(), 42);
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(to_base_units(dec("18446744073709551615"), 0).is_ok());
        assert!(to_base_units(dec("18446744073709551616"), 0).is_err());
        assert!(to_base_units(dec("1000000000000"), 9).is_err());
        assert!(to_base_units(dec("1"), 255).is_err());
    }

    #[test]
    fn test_floor_matches_across_decimals() {
        for decimals in 0..=9u8 {
            for supply in ["1", "7.25", "1000000", "0.000000001", "123.456"] {
                let s = dec(supply);
                let expected = (s * Decimal::from(10u64.pow(decimals as u32)))
                    .floor()
                    .to_u64()
                    .unwrap();
                assert_eq!(to_base_units(s, decimals).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_parse_supply() {
        assert_eq!(parse_supply(" 1000 ").unwrap(), dec("1000"));
        assert_eq!(parse_supply("0.5").unwrap(), dec("0.5"));
        assert!(parse_supply("0").is_err());
        assert!(parse_supply("-5").is_err());
        assert!(parse_supply("abc").is_err());
        assert!(parse_supply("").is_err());
    }

    #[test]
    fn test_supply_beyond_decimal_precision_is_rejected() {
        // 30 significant digits would round up to 2 and floor to 2 instead of 1
        let result = parse_supply("1.99999999999999999999999999999");
        assert!(matches!(result, Err(LaunchError::Validation(_))));

        let max_precision = parse_supply("1.999999999999999999999999999").unwrap();
        assert_eq!(to_base_units(max_precision, 0).unwrap(), 1);
    }
}
