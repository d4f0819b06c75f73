use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use celo_plugin_commons::diagnostics::Diagnostics;

use crate::chain::CeloChain;
use crate::error::{ActionError, ActionResult};
use crate::mento::decimals::{DEFAULT_DECIMALS, DecimalsResolver};
use crate::mento::encoder::CalldataEncoder;
use crate::mento::model::TransactionRecord;
use crate::mento::quote::parse_amount;
use crate::tokens::token_registry::{TokenRegistryTrait, resolve_token};
use crate::transfer::model::{TransferAsset, TransferParams, TransferPlan, TransferRequest};
use crate::wallet::actions::{ContractCall, WalletActions};

// Native CELO or ERC20 transfers. Only depends on the wallet and the token
// registry, with no knowledge of the concrete backend.
pub struct TransferService {
    wallet: Arc<dyn WalletActions>,
    decimals: Arc<DecimalsResolver>,
    registry: Arc<dyn TokenRegistryTrait>,
    encoder: Arc<dyn CalldataEncoder>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl TransferService {
    pub fn new(
        wallet: Arc<dyn WalletActions>,
        decimals: Arc<DecimalsResolver>,
        registry: Arc<dyn TokenRegistryTrait>,
        encoder: Arc<dyn CalldataEncoder>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            wallet,
            decimals,
            registry,
            encoder,
            diagnostics,
        }
    }

    pub async fn transfer(&self, request: &TransferRequest) -> ActionResult<TransactionRecord> {
        let params = self.validate(request)?;
        self.execute(&params).await.map_err(|err| {
            let err = ActionError::transfer_failed(err);
            self.diagnostics.error(&format!("[transfer] {err}"));
            err
        })
    }

    pub fn validate(&self, request: &TransferRequest) -> ActionResult<TransferParams> {
        let chain: CeloChain = request.from_chain.parse()?;
        let recipient =
            Address::from_str(request.to_address.trim()).map_err(|_| ActionError::InvalidAddress {
                field: "recipient",
                value: request.to_address.clone(),
            })?;

        let asset = match request.token.as_deref().map(str::trim) {
            None | Some("") => TransferAsset::Native,
            Some(token) if token.eq_ignore_ascii_case(chain.native_symbol()) => TransferAsset::Native,
            Some(token) => TransferAsset::Erc20(resolve_token(self.registry.as_ref(), chain, token)?),
        };

        Ok(TransferParams {
            chain,
            recipient,
            asset,
            amount: request.amount.trim().to_string(),
        })
    }

    async fn execute(&self, params: &TransferParams) -> ActionResult<TransactionRecord> {
        let plan = self.plan(params).await?;
        self.diagnostics.info(&format!(
            "[transfer] sending {} ({} decimals) to {:#x} on {}",
            plan.amount, plan.decimals, params.recipient, params.chain
        ));

        let call = match plan.asset {
            TransferAsset::Native => ContractCall::new(params.recipient, plan.amount, Bytes::new()),
            TransferAsset::Erc20(token) => {
                ContractCall::new(token, U256::ZERO, self.encoder.transfer(params.recipient, plan.amount))
            }
        };

        let from = self.wallet.account_address(params.chain).await?;
        let hash = self.wallet.send_transaction(params.chain, &call).await?;

        Ok(TransactionRecord {
            hash,
            from,
            to: call.to,
            value: call.value,
            data: call.data,
        })
    }

    async fn plan(&self, params: &TransferParams) -> ActionResult<TransferPlan> {
        let decimals = match params.asset {
            TransferAsset::Native => DEFAULT_DECIMALS,
            TransferAsset::Erc20(token) => self.decimals.resolve(params.chain, token).await.value(),
        };

        Ok(TransferPlan {
            asset: params.asset,
            amount: parse_amount(&params.amount, decimals)?,
            decimals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;
    use crate::mento::encoder::MentoCalldataEncoder;
    use crate::tokens::erc20;
    use crate::tokens::token_registry::TokenRegistry;
    use crate::wallet::actions::MockWalletActions;
    use alloy::primitives::{TxHash, address, b256};
    use celo_plugin_commons::diagnostics::RecordingDiagnostics;
    use mockall::predicate::eq;

    const SIGNER: Address = address!("5555555555555555555555555555555555555555");
    const RECIPIENT: Address = address!("742d35cc6634c0532925a3b844bc454e4438f44e");
    const CUSD_ALFAJORES: Address = address!("874069fa1eb16d44d622f2e0ca25eea172369bc1");
    const HASH: TxHash = b256!("0303030303030303030303030303030303030303030303030303030303030303");

    fn service(wallet: MockWalletActions) -> TransferService {
        let wallet: Arc<dyn WalletActions> = Arc::new(wallet);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        TransferService::new(
            wallet.clone(),
            Arc::new(DecimalsResolver::new(wallet, diagnostics.clone())),
            Arc::new(TokenRegistry::with_defaults()),
            Arc::new(MentoCalldataEncoder),
            diagnostics,
        )
    }

    fn request(chain: &str, amount: &str, token: Option<&str>) -> TransferRequest {
        TransferRequest {
            from_chain: chain.to_string(),
            amount: amount.to_string(),
            to_address: format!("{RECIPIENT:#x}"),
            token: token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn native_transfer_sends_value_with_empty_calldata() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().never();
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        let expected = ContractCall::new(RECIPIENT, U256::from(1_500_000_000_000_000_000u128), Bytes::new());
        wallet
            .expect_send_transaction()
            .with(eq(CeloChain::Alfajores), eq(expected))
            .times(1)
            .returning(|_, _| Ok(HASH));

        // when
        let record = service(wallet).transfer(&request("alfajores", "1.5", None)).await.unwrap();

        // then
        assert_eq!(record.hash, HASH);
        assert_eq!(record.from, SIGNER);
        assert_eq!(record.to, RECIPIENT);
        assert!(record.data.is_empty());
    }

    #[tokio::test]
    async fn erc20_transfer_calls_the_token_contract() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet
            .expect_read_decimals()
            .with(eq(CeloChain::Alfajores), eq(CUSD_ALFAJORES))
            .returning(|_, _| Ok(18));
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        let data = erc20::encode_transfer(RECIPIENT, U256::from(2_000_000_000_000_000_000u128));
        let expected = ContractCall::new(CUSD_ALFAJORES, U256::ZERO, data);
        wallet
            .expect_send_transaction()
            .with(eq(CeloChain::Alfajores), eq(expected))
            .times(1)
            .returning(|_, _| Ok(HASH));

        // when
        let record = service(wallet)
            .transfer(&request("alfajores", "2", Some("cUSD")))
            .await
            .unwrap();

        // then
        assert_eq!(record.to, CUSD_ALFAJORES);
        assert_eq!(record.value, U256::ZERO);
    }

    #[tokio::test]
    async fn native_symbol_is_sent_as_value() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        wallet
            .expect_send_transaction()
            .withf(|_, call| call.to == RECIPIENT && call.value == U256::from(10u64).pow(U256::from(18u64)))
            .times(1)
            .returning(|_, _| Ok(HASH));

        let record = service(wallet).transfer(&request("celo", "1", Some("celo"))).await.unwrap();

        assert_eq!(record.hash, HASH);
    }

    #[tokio::test]
    async fn unsupported_chain_is_rejected_unwrapped() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_send_transaction().never();

        let err = service(wallet).transfer(&request("base", "1", None)).await.unwrap_err();

        assert!(matches!(err, ActionError::UnsupportedChain { .. }));
    }

    #[tokio::test]
    async fn malformed_recipient_is_rejected() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_send_transaction().never();
        let request = TransferRequest {
            to_address: "vitalik".to_string(),
            ..request("celo", "1", None)
        };

        let err = service(wallet).transfer(&request).await.unwrap_err();

        assert!(matches!(err, ActionError::InvalidAddress { field: "recipient", .. }));
    }

    #[tokio::test]
    async fn wallet_failure_is_wrapped_as_transfer_failed() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        wallet
            .expect_send_transaction()
            .returning(|_, _| Err(WalletError::Revert("transfer amount exceeds balance".into())));

        // when
        let err = service(wallet).transfer(&request("celo", "1", None)).await.unwrap_err();

        // then
        assert!(matches!(err, ActionError::TransferFailed { .. }));
        assert_eq!(
            err.to_string(),
            "transfer failed: wallet error: revert: transfer amount exceeds balance"
        );
    }

    #[tokio::test]
    async fn bad_amount_never_reaches_the_wallet() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_account_address().never();
        wallet.expect_send_transaction().never();

        let err = service(wallet).transfer(&request("celo", "-1", None)).await.unwrap_err();

        assert!(matches!(err.root(), ActionError::InvalidAmount { .. }));
    }
}
