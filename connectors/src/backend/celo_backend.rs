use alloy::contract::Error as ContractError;
use alloy::network::{AnyNetwork, TransactionBuilder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError, TransportError};
use async_trait::async_trait;
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::error::WalletError;
use celo_plugin_core::tokens::erc20::IERC20;
use celo_plugin_core::wallet::actions::{ContractCall, WalletActions};
use log::debug;

use crate::backend::providers::ChainProviders;

fn rpc_error(err: TransportError) -> WalletError {
    match &err {
        RpcError::LocalUsageError(_) => WalletError::Signing(err.to_string()),
        RpcError::ErrorResp(payload) if payload.message.contains("revert") => WalletError::Revert(err.to_string()),
        _ => WalletError::Rpc(err.to_string()),
    }
}

fn contract_error(err: ContractError) -> WalletError {
    match err {
        ContractError::TransportError(e) => rpc_error(e),
        other => WalletError::Other(other.to_string()),
    }
}

/// Signs with one local key and talks to each Celo network through its own
/// provider.
pub struct CeloBackendImpl<P> {
    providers: ChainProviders<P>,
    signer: Address,
}

impl<P> CeloBackendImpl<P> {
    pub fn new(providers: ChainProviders<P>, signer: Address) -> Self {
        Self { providers, signer }
    }
}

#[async_trait]
impl<P> WalletActions for CeloBackendImpl<P>
where
    P: Provider<AnyNetwork> + Send + Sync + Clone + 'static,
{
    async fn account_address(&self, chain: CeloChain) -> Result<Address, WalletError> {
        self.providers.get(chain)?;
        Ok(self.signer)
    }

    async fn send_transaction(&self, chain: CeloChain, call: &ContractCall) -> Result<TxHash, WalletError> {
        let provider = self.providers.get(chain)?;

        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(call.to)
            .with_value(call.value)
            .with_input(call.data.clone())
            .with_chain_id(chain.chain_id());

        let pending = provider.send_transaction(tx.into()).await.map_err(rpc_error)?;
        let hash = *pending.tx_hash();

        debug!("sent tx {hash:#x} to {:#x} on {chain}", call.to);
        Ok(hash)
    }

    async fn read_decimals(&self, chain: CeloChain, token: Address) -> Result<u8, WalletError> {
        let provider = self.providers.get(chain)?;
        let contract = IERC20::new(token, provider.clone());

        contract.decimals().call().await.map_err(contract_error)
    }

    async fn native_balance(&self, chain: CeloChain) -> Result<U256, WalletError> {
        let provider = self.providers.get(chain)?;
        provider.get_balance(self.signer).await.map_err(rpc_error)
    }
}
