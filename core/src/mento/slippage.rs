use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ActionError, ActionResult};

const BPS_SCALE: u64 = 10_000;

/// Tolerated output shortfall, as an exact decimal percentage in [0, 100].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slippage {
    percent: Decimal,
}

impl Slippage {
    pub const DEFAULT_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5

    pub fn from_percent(percent: Decimal) -> ActionResult<Self> {
        if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
            return Err(ActionError::InvalidSlippage {
                slippage: percent.to_string(),
            });
        }
        Ok(Self { percent })
    }

    pub fn zero() -> Self {
        Self { percent: Decimal::ZERO }
    }

    /// `None` falls back to the 0.5% default the prompt asks the model to use.
    pub fn parse_or_default(raw: Option<&str>) -> ActionResult<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse(),
            None => Ok(Self::default()),
        }
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }

    /// floor((100 - slippage) * 100): the share of the output kept, in bps.
    pub fn keep_bps(&self) -> u64 {
        ((Decimal::ONE_HUNDRED - self.percent) * Decimal::ONE_HUNDRED)
            .floor()
            .to_u64()
            .unwrap_or(0)
    }

    /// Worst-case acceptable output. Rounds down; `None` on overflow.
    pub fn min_amount_out(&self, amount: U256) -> Option<U256> {
        amount
            .checked_mul(U256::from(self.keep_bps()))
            .map(|scaled| scaled / U256::from(BPS_SCALE))
    }
}

impl Default for Slippage {
    fn default() -> Self {
        Self {
            percent: Self::DEFAULT_PERCENT,
        }
    }
}

impl FromStr for Slippage {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let percent = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ActionError::InvalidSlippage { slippage: s.to_string() })?;
        Self::from_percent(percent)
    }
}

impl fmt::Display for Slippage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.percent.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slippage(raw: &str) -> Slippage {
        raw.parse().unwrap()
    }

    #[test]
    fn half_percent_on_six_decimal_amount() {
        assert_eq!(
            slippage("0.5").min_amount_out(U256::from(1_000_000u64)),
            Some(U256::from(995_000u64))
        );
    }

    #[test]
    fn zero_slippage_keeps_full_amount() {
        let amount = U256::from(123_456_789u64);
        assert_eq!(Slippage::zero().min_amount_out(amount), Some(amount));
        assert_eq!(slippage("0").keep_bps(), 10_000);
    }

    #[test]
    fn minimum_never_exceeds_amount() {
        let amount = U256::from(10u64).pow(U256::from(18u64)) * U256::from(7u64) + U256::from(3u64);
        for raw in ["0.01", "0.5", "1", "2.75", "33.333", "99.99", "100"] {
            let min = slippage(raw).min_amount_out(amount).unwrap();
            assert!(min < amount, "{raw}% should reduce the amount");
        }
    }

    #[test]
    fn sub_basis_point_precision_rounds_down() {
        // (100 - 0.00001) * 100 = 9999.999 -> 9999
        assert_eq!(slippage("0.00001").keep_bps(), 9_999);
    }

    #[test]
    fn default_is_half_percent() {
        assert_eq!(Slippage::default(), slippage("0.5"));
        assert_eq!(Slippage::parse_or_default(None).unwrap().to_string(), "0.5");
        assert_eq!(Slippage::parse_or_default(Some(" ")).unwrap(), Slippage::default());
        assert_eq!(Slippage::parse_or_default(Some("1%")).unwrap(), slippage("1"));
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        for raw in ["-0.1", "100.01", "abc", "NaN"] {
            let err = raw.parse::<Slippage>().unwrap_err();
            assert!(matches!(err, ActionError::InvalidSlippage { .. }), "{raw} should be rejected");
        }
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(slippage("1").min_amount_out(U256::MAX), None);
    }
}
