use alloy::primitives::U256;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount is not a decimal number")]
    InvalidDigit,
    #[error("more than {max} fractional digits")]
    TooPrecise { max: u8 },
    #[error("amount does not fit in 256 bits")]
    Overflow,
}

/// Parses a human decimal string ("1.5") into the token's smallest unit.
///
/// Trailing fractional zeros beyond `decimals` are accepted ("1.50" at 1
/// decimal), any other excess precision is an error rather than a silent
/// truncation.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (integral, fractional) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if integral.is_empty() && fractional.is_empty() {
        return Err(AmountError::InvalidDigit);
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integral) || !all_digits(fractional) {
        return Err(AmountError::InvalidDigit);
    }

    let fractional = fractional.trim_end_matches('0');
    if fractional.len() > decimals as usize {
        return Err(AmountError::TooPrecise { max: decimals });
    }

    let scale = pow10(decimals as usize)?;
    let integral_value = digits_to_u256(integral)?;
    let fractional_value = digits_to_u256(fractional)?
        .checked_mul(pow10(decimals as usize - fractional.len())?)
        .ok_or(AmountError::Overflow)?;

    integral_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fractional_value))
        .ok_or(AmountError::Overflow)
}

/// Renders a smallest-unit amount as a decimal string without trailing zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

fn pow10(exp: usize) -> Result<U256, AmountError> {
    U256::from(10u8)
        .checked_pow(U256::from(exp as u64))
        .ok_or(AmountError::Overflow)
}

fn digits_to_u256(digits: &str) -> Result<U256, AmountError> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_units("10", 18).unwrap(), units(10_000_000_000_000_000_000));
        assert_eq!(parse_units("1.5", 6).unwrap(), units(1_500_000));
        assert_eq!(parse_units(".25", 2).unwrap(), units(25));
        assert_eq!(parse_units("3.", 2).unwrap(), units(300));
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_units(" 7 ", 0).unwrap(), units(7));
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        assert_eq!(parse_units("1.500000", 1).unwrap(), units(15));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!(parse_units("abc", 18), Err(AmountError::InvalidDigit));
        assert_eq!(parse_units("1e18", 18), Err(AmountError::InvalidDigit));
        assert_eq!(parse_units("1,000", 18), Err(AmountError::InvalidDigit));
        assert_eq!(parse_units(".", 18), Err(AmountError::InvalidDigit));
        assert_eq!(parse_units("", 18), Err(AmountError::Empty));
        assert_eq!(parse_units("-1", 18), Err(AmountError::Negative));
    }

    #[test]
    fn rejects_amounts_finer_than_token_precision() {
        assert_eq!(parse_units("0.0000001", 6), Err(AmountError::TooPrecise { max: 6 }));
    }

    #[test]
    fn rejects_amounts_beyond_256_bits() {
        assert_eq!(parse_units("1", 80), Err(AmountError::Overflow));
        let huge = "9".repeat(80);
        assert_eq!(parse_units(&huge, 0), Err(AmountError::Overflow));
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_units(units(9_900_000_000_000_000_000), 18), "9.9");
        assert_eq!(format_units(units(10_000_000_000_000_000_000), 18), "10");
        assert_eq!(format_units(units(995_000), 6), "0.995");
        assert_eq!(format_units(units(5), 6), "0.000005");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(units(42), 0), "42");
    }
}
