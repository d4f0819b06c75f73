use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use celo_plugin_commons::error::ExternalError;

use crate::chain::CeloChain;

/// One side of a priced swap: the token and the decimals its amounts use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapLeg {
    pub token: Address,
    pub decimals: u8,
}

impl SwapLeg {
    pub const fn new(token: Address, decimals: u8) -> Self {
        Self { token, decimals }
    }
}

/// Source of expected swap output amounts. `amount_in` is in the input
/// token's smallest units and the result is in the output token's.
#[mockall::automock]
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn amount_out(
        &self,
        chain: CeloChain,
        token_in: SwapLeg,
        token_out: SwapLeg,
        amount_in: U256,
    ) -> Result<U256, ExternalError>;
}

/// Applies a constant `numerator / denominator` rate between whole tokens,
/// rescaling from the input token's decimals to the output token's. Used
/// where no Mento exchange is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedRateOracle {
    numerator: U256,
    denominator: U256,
}

impl FixedRateOracle {
    pub fn new(numerator: U256, denominator: U256) -> Result<Self, ExternalError> {
        if denominator.is_zero() {
            return Err(ExternalError::from("fixed rate denominator must be non-zero"));
        }
        Ok(Self { numerator, denominator })
    }

    pub fn parity() -> Self {
        Self {
            numerator: U256::from(1u8),
            denominator: U256::from(1u8),
        }
    }

    /// Parses `"num/den"` or a bare integer (`"2"` == `"2/1"`).
    pub fn parse(raw: &str) -> Result<Self, ExternalError> {
        let (num, den) = raw.trim().split_once('/').unwrap_or((raw.trim(), "1"));
        let parse = |s: &str| {
            U256::from_str_radix(s.trim(), 10).map_err(|e| ExternalError(format!("invalid fixed rate `{raw}`: {e}")))
        };
        Self::new(parse(num)?, parse(den)?)
    }
}

impl Default for FixedRateOracle {
    fn default() -> Self {
        Self::parity()
    }
}

#[async_trait]
impl PriceOracle for FixedRateOracle {
    async fn amount_out(
        &self,
        _chain: CeloChain,
        token_in: SwapLeg,
        token_out: SwapLeg,
        amount_in: U256,
    ) -> Result<U256, ExternalError> {
        let overflow = || ExternalError::from("fixed rate output overflows 256 bits");

        let (scale_up, scale_down) = if token_out.decimals >= token_in.decimals {
            (pow10(token_out.decimals - token_in.decimals), Some(U256::from(1u8)))
        } else {
            (Some(U256::from(1u8)), pow10(token_in.decimals - token_out.decimals))
        };

        let numerator = scale_up
            .and_then(|up| amount_in.checked_mul(self.numerator)?.checked_mul(up))
            .ok_or_else(overflow)?;
        let denominator = scale_down
            .and_then(|down| self.denominator.checked_mul(down))
            .ok_or_else(overflow)?;

        Ok(numerator / denominator)
    }
}

fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(decimals: u8) -> SwapLeg {
        SwapLeg::new(Address::ZERO, decimals)
    }

    #[tokio::test]
    async fn parity_returns_input_amount() {
        let out = FixedRateOracle::parity()
            .amount_out(CeloChain::Celo, leg(18), leg(18), U256::from(42u64))
            .await
            .unwrap();
        assert_eq!(out, U256::from(42u64));
    }

    #[tokio::test]
    async fn ratio_rounds_down() {
        let oracle = FixedRateOracle::parse("2/3").unwrap();
        let out = oracle
            .amount_out(CeloChain::Alfajores, leg(18), leg(18), U256::from(10u64))
            .await
            .unwrap();
        assert_eq!(out, U256::from(6u64));
    }

    #[tokio::test]
    async fn parity_rescales_between_decimals() {
        // given
        let two_at_18 = U256::from(2_000_000_000_000_000_000u128);

        // when
        let down = FixedRateOracle::parity()
            .amount_out(CeloChain::Celo, leg(18), leg(6), two_at_18)
            .await
            .unwrap();
        let up = FixedRateOracle::parity()
            .amount_out(CeloChain::Celo, leg(6), leg(18), U256::from(2_000_000u64))
            .await
            .unwrap();

        // then
        assert_eq!(down, U256::from(2_000_000u64));
        assert_eq!(up, two_at_18);
    }

    #[tokio::test]
    async fn rate_applies_to_whole_tokens() {
        let oracle = FixedRateOracle::parse("3/2").unwrap();

        let out = oracle
            .amount_out(CeloChain::Celo, leg(6), leg(18), U256::from(1_000_000u64))
            .await
            .unwrap();

        assert_eq!(out, U256::from(1_500_000_000_000_000_000u128));
    }

    #[tokio::test]
    async fn oversized_scale_is_reported_as_overflow() {
        let err = FixedRateOracle::parity()
            .amount_out(CeloChain::Celo, leg(0), leg(255), U256::from(1u8))
            .await
            .unwrap_err();

        assert!(err.0.contains("overflows"));
    }

    #[test]
    fn parse_accepts_bare_integers_and_rejects_zero_denominator() {
        assert_eq!(FixedRateOracle::parse("2").unwrap(), FixedRateOracle::new(U256::from(2u8), U256::from(1u8)).unwrap());
        assert!(FixedRateOracle::parse("1/0").is_err());
        assert!(FixedRateOracle::parse("one").is_err());
    }
}
