use std::sync::Arc;

use celo_plugin_commons::diagnostics::Diagnostics;

use crate::chain::CeloChain;
use crate::error::{ActionError, ActionResult};
use crate::mento::decimals::DecimalsResolver;
use crate::mento::deployment::MentoDeployments;
use crate::mento::encoder::CalldataEncoder;
use crate::mento::model::{MentoParams, OperationKind, OperationOutcome, OperationRequest, QuoteResult, TransactionRecord};
use crate::mento::oracle::PriceOracle;
use crate::mento::quote::QuoteEstimator;
use crate::mento::slippage::Slippage;
use crate::mento::transaction::TransactionBuilder;
use crate::tokens::token_registry::{TokenRegistryTrait, resolve_token};
use crate::wallet::actions::WalletActions;

// Entry point for Mento operations. Validates the untrusted request,
// dispatches by operation kind and wraps downstream failures with context.
pub struct MentoService {
    registry: Arc<dyn TokenRegistryTrait>,
    decimals: Arc<DecimalsResolver>,
    quotes: Arc<QuoteEstimator>,
    transactions: TransactionBuilder,
    diagnostics: Arc<dyn Diagnostics>,
}

impl MentoService {
    pub fn new(
        wallet: Arc<dyn WalletActions>,
        oracle: Arc<dyn PriceOracle>,
        encoder: Arc<dyn CalldataEncoder>,
        registry: Arc<dyn TokenRegistryTrait>,
        deployments: MentoDeployments,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let decimals = Arc::new(DecimalsResolver::new(wallet.clone(), diagnostics.clone()));
        let quotes = Arc::new(QuoteEstimator::new(decimals.clone(), oracle, diagnostics.clone()));
        let transactions = TransactionBuilder::new(
            wallet,
            decimals.clone(),
            quotes.clone(),
            encoder,
            deployments,
            diagnostics.clone(),
        );

        Self {
            registry,
            decimals,
            quotes,
            transactions,
            diagnostics,
        }
    }

    pub async fn execute(&self, request: &OperationRequest) -> ActionResult<OperationOutcome> {
        let params = self.validate(request)?;
        self.execute_validated(&params).await
    }

    pub async fn execute_validated(&self, params: &MentoParams) -> ActionResult<OperationOutcome> {
        self.diagnostics.info(&format!(
            "[mento] {} on {} requested",
            params.operation, params.chain
        ));

        let outcome = match params.operation {
            OperationKind::Quote => self.quotes.get_quote(params).await.map(OperationOutcome::Quote),
            OperationKind::Approve => self
                .transactions
                .build_approval(params)
                .await
                .map(OperationOutcome::Transaction),
            OperationKind::Swap => self
                .transactions
                .build_swap(params)
                .await
                .map(OperationOutcome::Transaction),
        };

        outcome.map_err(|err| {
            let err = ActionError::operation_failed(params.operation)(err);
            self.diagnostics.error(&format!("[mento] {err}"));
            err
        })
    }

    pub async fn get_quote(&self, params: &MentoParams) -> ActionResult<QuoteResult> {
        self.quotes.get_quote(params).await
    }

    pub async fn build_approval(&self, params: &MentoParams) -> ActionResult<TransactionRecord> {
        self.transactions.build_approval(params).await
    }

    pub async fn build_swap(&self, params: &MentoParams) -> ActionResult<TransactionRecord> {
        self.transactions.build_swap(params).await
    }

    pub fn registry(&self) -> Arc<dyn TokenRegistryTrait> {
        self.registry.clone()
    }

    pub fn decimals(&self) -> Arc<DecimalsResolver> {
        self.decimals.clone()
    }

    /// Chain first, then operation, tokens and slippage. No wallet calls.
    pub fn validate(&self, request: &OperationRequest) -> ActionResult<MentoParams> {
        let chain: CeloChain = request.chain.parse()?;
        let operation: OperationKind = request.operation.parse()?;
        let from_token = resolve_token(self.registry.as_ref(), chain, &request.from_token)?;
        let to_token = resolve_token(self.registry.as_ref(), chain, &request.to_token)?;
        let slippage = Slippage::parse_or_default(request.slippage.as_deref())?;

        Ok(MentoParams {
            chain,
            operation,
            from_token,
            to_token,
            amount: request.amount.trim().to_string(),
            slippage,
        })
    }
}
