use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::mento::deployment::MentoDeployment;
use crate::mento::model::QuoteResult;
use crate::tokens::erc20;

sol! {
    #[sol(rpc)]
    interface IBroker {
        function getAmountOut(address exchangeProvider, bytes32 exchangeId, address tokenIn, address tokenOut, uint256 amountIn) external view returns (uint256 amountOut);
        function swapIn(address exchangeProvider, bytes32 exchangeId, address tokenIn, address tokenOut, uint256 amountIn, uint256 amountOutMin) external returns (uint256 amountOut);
    }
}

/// Builds the calldata for every contract call the plugin submits.
#[mockall::automock]
pub trait CalldataEncoder: Send + Sync {
    fn approve(&self, spender: Address, amount: U256) -> Bytes;

    fn transfer(&self, to: Address, amount: U256) -> Bytes;

    fn swap_in(&self, deployment: &MentoDeployment, quote: &QuoteResult) -> Bytes;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MentoCalldataEncoder;

impl CalldataEncoder for MentoCalldataEncoder {
    fn approve(&self, spender: Address, amount: U256) -> Bytes {
        erc20::encode_approve(spender, amount)
    }

    fn transfer(&self, to: Address, amount: U256) -> Bytes {
        erc20::encode_transfer(to, amount)
    }

    // amountOutMin carries the quote's slippage floor, so the broker reverts
    // instead of filling below it.
    fn swap_in(&self, deployment: &MentoDeployment, quote: &QuoteResult) -> Bytes {
        IBroker::swapInCall {
            exchangeProvider: deployment.exchange_provider,
            exchangeId: deployment.exchange_id,
            tokenIn: quote.from_token,
            tokenOut: quote.to_token,
            amountIn: quote.from_amount,
            amountOutMin: quote.min_to_amount,
        }
        .abi_encode()
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mento::decimals::DecimalsResolution;
    use alloy::primitives::{B256, address};

    #[test]
    fn swap_in_encodes_quote_amounts_and_exchange() {
        // given
        let deployment = MentoDeployment {
            broker: address!("777a8255ca72412f0d706dc03c9d1987306b4cad"),
            exchange_provider: address!("3333333333333333333333333333333333333333"),
            exchange_id: B256::repeat_byte(0xab),
        };
        let quote = QuoteResult {
            from_token: address!("471ece3750da237f93b8e339c536989b8978a438"),
            to_token: address!("765de816845861e75a25fca122bb6898b8b1282a"),
            from_amount: U256::from(2_000u64),
            to_amount: U256::from(2_000u64),
            min_to_amount: U256::from(1_990u64),
            from_decimals: DecimalsResolution::Resolved(18),
            to_decimals: DecimalsResolution::Resolved(18),
        };

        // when
        let data = MentoCalldataEncoder.swap_in(&deployment, &quote);

        // then
        let decoded = IBroker::swapInCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.exchangeProvider, deployment.exchange_provider);
        assert_eq!(decoded.exchangeId, deployment.exchange_id);
        assert_eq!(decoded.tokenIn, quote.from_token);
        assert_eq!(decoded.tokenOut, quote.to_token);
        assert_eq!(decoded.amountIn, quote.from_amount);
        assert_eq!(decoded.amountOutMin, quote.min_to_amount);
    }
}
