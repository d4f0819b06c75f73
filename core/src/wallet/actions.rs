use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::chain::CeloChain;
use crate::error::WalletError;

/// A transaction the wallet should sign and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl ContractCall {
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value, data }
    }
}

// Every call names its chain; the wallet holds no "current network" state.
#[mockall::automock]
#[async_trait]
pub trait WalletActions: Send + Sync {
    // Address of the signing account on `chain`.
    async fn account_address(&self, chain: CeloChain) -> Result<Address, WalletError>;

    // Sign and broadcast, returning the hash without waiting for inclusion.
    async fn send_transaction(&self, chain: CeloChain, call: &ContractCall) -> Result<TxHash, WalletError>;

    // ERC20 `decimals()` read.
    async fn read_decimals(&self, chain: CeloChain, token: Address) -> Result<u8, WalletError>;

    // Native CELO balance of the signing account, in wei.
    async fn native_balance(&self, chain: CeloChain) -> Result<U256, WalletError>;
}
