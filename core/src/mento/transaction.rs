use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use celo_plugin_commons::diagnostics::Diagnostics;

use crate::chain::CeloChain;
use crate::error::{ActionError, ActionResult};
use crate::mento::decimals::DecimalsResolver;
use crate::mento::deployment::MentoDeployments;
use crate::mento::encoder::CalldataEncoder;
use crate::mento::model::{MentoParams, OperationKind, TransactionRecord};
use crate::mento::quote::{QuoteEstimator, parse_amount};
use crate::wallet::actions::{ContractCall, WalletActions};

/// Builds and submits the allowance and swap transactions. Exactly one
/// transaction is sent per call and nothing is retried.
pub struct TransactionBuilder {
    wallet: Arc<dyn WalletActions>,
    decimals: Arc<DecimalsResolver>,
    quotes: Arc<QuoteEstimator>,
    encoder: Arc<dyn CalldataEncoder>,
    deployments: MentoDeployments,
    diagnostics: Arc<dyn Diagnostics>,
}

impl TransactionBuilder {
    pub fn new(
        wallet: Arc<dyn WalletActions>,
        decimals: Arc<DecimalsResolver>,
        quotes: Arc<QuoteEstimator>,
        encoder: Arc<dyn CalldataEncoder>,
        deployments: MentoDeployments,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            wallet,
            decimals,
            quotes,
            encoder,
            deployments,
            diagnostics,
        }
    }

    /// ERC20 `approve(broker, amount)` sent to the input token.
    pub async fn build_approval(&self, params: &MentoParams) -> ActionResult<TransactionRecord> {
        self.approval(params)
            .await
            .map_err(ActionError::build_failed(OperationKind::Approve))
    }

    /// Quotes first, then sends `Broker.swapIn` with the quote's minimum as
    /// the on-chain output floor.
    pub async fn build_swap(&self, params: &MentoParams) -> ActionResult<TransactionRecord> {
        self.swap(params)
            .await
            .map_err(ActionError::build_failed(OperationKind::Swap))
    }

    async fn approval(&self, params: &MentoParams) -> ActionResult<TransactionRecord> {
        self.diagnostics.info(&format!(
            "[mento] increasing allowance for {} {:#x} on {}",
            params.amount, params.from_token, params.chain
        ));

        let decimals = self.decimals.resolve(params.chain, params.from_token).await;
        let amount = parse_amount(&params.amount, decimals.value())?;
        let spender = self.deployments.get(params.chain).broker;

        let data = self.encoder.approve(spender, amount);
        self.submit(params.chain, params.from_token, data).await
    }

    async fn swap(&self, params: &MentoParams) -> ActionResult<TransactionRecord> {
        let deployment = self.deployments.get(params.chain);
        if !deployment.has_exchange() {
            return Err(ActionError::ExchangeNotConfigured { chain: params.chain });
        }

        let quote = self.quotes.get_quote(params).await?;

        self.diagnostics.info(&format!(
            "[mento] swapping {} {:#x} -> {:#x} (min out {}) on {}",
            params.amount, params.from_token, params.to_token, quote.min_to_amount, params.chain
        ));

        let data = self.encoder.swap_in(deployment, &quote);
        self.submit(params.chain, deployment.broker, data).await
    }

    async fn submit(&self, chain: CeloChain, to: Address, data: Bytes) -> ActionResult<TransactionRecord> {
        let from = self.wallet.account_address(chain).await?;

        let call = ContractCall::new(to, U256::ZERO, data);
        let hash = self.wallet.send_transaction(chain, &call).await.map_err(|e| {
            self.diagnostics
                .error(&format!("[mento] transaction to {to:#x} on {chain} failed: {e}"));
            e
        })?;

        Ok(TransactionRecord {
            hash,
            from,
            to: call.to,
            value: call.value,
            data: call.data,
        })
    }
}
