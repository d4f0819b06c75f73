use std::sync::Arc;

use celo_plugin_commons::diagnostics::Diagnostics;

use crate::error::{ActionError, ActionResult};
use crate::mento::decimals::DecimalsResolver;
use crate::mento::model::{MentoParams, QuoteResult};
use crate::mento::oracle::{PriceOracle, SwapLeg};
use crate::tokens::token_amount::parse_units;

/// Read-only: resolves decimals, prices the input and applies slippage.
pub struct QuoteEstimator {
    decimals: Arc<DecimalsResolver>,
    oracle: Arc<dyn PriceOracle>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl QuoteEstimator {
    pub fn new(decimals: Arc<DecimalsResolver>, oracle: Arc<dyn PriceOracle>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            decimals,
            oracle,
            diagnostics,
        }
    }

    pub async fn get_quote(&self, params: &MentoParams) -> ActionResult<QuoteResult> {
        self.diagnostics.info(&format!(
            "[mento] quote {} {:#x} -> {:#x} on {}",
            params.amount, params.from_token, params.to_token, params.chain
        ));

        let from_decimals = self.decimals.resolve(params.chain, params.from_token).await;
        let to_decimals = self.decimals.resolve(params.chain, params.to_token).await;

        let from_amount = parse_amount(&params.amount, from_decimals.value())?;

        let to_amount = self
            .oracle
            .amount_out(
                params.chain,
                SwapLeg::new(params.from_token, from_decimals.value()),
                SwapLeg::new(params.to_token, to_decimals.value()),
                from_amount,
            )
            .await
            .map_err(|source| ActionError::PriceUnavailable {
                token_in: params.from_token,
                token_out: params.to_token,
                source,
            })?;

        let min_to_amount = params
            .slippage
            .min_amount_out(to_amount)
            .ok_or_else(|| ActionError::InvalidAmount {
                amount: to_amount.to_string(),
                decimals: to_decimals.value(),
                reason: "slippage-adjusted output overflows 256 bits".to_string(),
            })?;

        Ok(QuoteResult {
            from_token: params.from_token,
            to_token: params.to_token,
            from_amount,
            to_amount,
            min_to_amount,
            from_decimals,
            to_decimals,
        })
    }
}

pub(crate) fn parse_amount(amount: &str, decimals: u8) -> ActionResult<alloy::primitives::U256> {
    parse_units(amount, decimals).map_err(|e| ActionError::InvalidAmount {
        amount: amount.to_string(),
        decimals,
        reason: e.to_string(),
    })
}
