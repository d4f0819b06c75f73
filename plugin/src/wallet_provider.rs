//! Supplies `{{walletInfo}}`: the agent's address and native balance on each
//! configured network, so the model knows what the wallet can spend.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::error::WalletError;
use celo_plugin_core::tokens::token_amount::format_units;
use celo_plugin_core::wallet::actions::WalletActions;
use log::{debug, warn};

pub const WALLET_INFO_KEY: &str = "walletInfo";

const NATIVE_DECIMALS: u8 = 18;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletInfo {
    pub chain: CeloChain,
    pub address: Address,
    pub balance: U256,
}

impl fmt::Display for WalletInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (chain id {}): {:#x}, balance {} {}",
            self.chain,
            self.chain.chain_id(),
            self.address,
            format_units(self.balance, NATIVE_DECIMALS),
            self.chain.native_symbol()
        )
    }
}

pub struct WalletInfoProvider {
    wallet: Arc<dyn WalletActions>,
}

impl WalletInfoProvider {
    pub fn new(wallet: Arc<dyn WalletActions>) -> Self {
        Self { wallet }
    }

    pub async fn wallet_info(&self, chain: CeloChain) -> Result<WalletInfo, WalletError> {
        let address = self.wallet.account_address(chain).await?;
        let balance = self.wallet.native_balance(chain).await?;
        Ok(WalletInfo {
            chain,
            address,
            balance,
        })
    }

    /// One line per reachable network. Networks without a provider are
    /// skipped; read failures are logged and left out.
    pub async fn describe(&self) -> String {
        let mut lines = Vec::with_capacity(CeloChain::ALL.len());
        for chain in CeloChain::ALL {
            match self.wallet_info(chain).await {
                Ok(info) => lines.push(info.to_string()),
                Err(WalletError::UnsupportedChain { .. }) => debug!("no wallet on {chain}"),
                Err(err) => warn!("wallet info for {chain} unavailable: {err}"),
            }
        }

        if lines.is_empty() {
            "Wallet information is unavailable.".to_string()
        } else {
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use celo_plugin_core::wallet::actions::MockWalletActions;
    use mockall::predicate::eq;

    const SIGNER: Address = address!("5555555555555555555555555555555555555555");

    #[tokio::test]
    async fn wallet_info_reads_address_and_balance() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet
            .expect_account_address()
            .with(eq(CeloChain::Alfajores))
            .times(1)
            .returning(|_| Ok(SIGNER));
        wallet
            .expect_native_balance()
            .with(eq(CeloChain::Alfajores))
            .times(1)
            .returning(|_| Ok(U256::from(1_500_000_000_000_000_000u128)));
        let provider = WalletInfoProvider::new(Arc::new(wallet));

        // when
        let info = provider.wallet_info(CeloChain::Alfajores).await.unwrap();

        // then
        assert_eq!(info.address, SIGNER);
        assert_eq!(
            info.to_string(),
            "alfajores (chain id 44787): 0x5555555555555555555555555555555555555555, balance 1.5 CELO"
        );
    }

    #[tokio::test]
    async fn describe_skips_unconfigured_and_failing_networks() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet
            .expect_account_address()
            .with(eq(CeloChain::Celo))
            .returning(|_| Ok(SIGNER));
        wallet
            .expect_native_balance()
            .with(eq(CeloChain::Celo))
            .returning(|_| Err(WalletError::Rpc("timeout".into())));
        wallet
            .expect_account_address()
            .with(eq(CeloChain::Alfajores))
            .returning(|chain| Err(WalletError::UnsupportedChain { chain }));
        let provider = WalletInfoProvider::new(Arc::new(wallet));

        // when
        let text = provider.describe().await;

        // then
        assert_eq!(text, "Wallet information is unavailable.");
    }

    #[tokio::test]
    async fn describe_lists_each_reachable_network() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        wallet
            .expect_native_balance()
            .with(eq(CeloChain::Celo))
            .returning(|_| Ok(U256::from(2_000_000_000_000_000_000u128)));
        wallet
            .expect_native_balance()
            .with(eq(CeloChain::Alfajores))
            .returning(|_| Ok(U256::ZERO));
        let provider = WalletInfoProvider::new(Arc::new(wallet));

        let text = provider.describe().await;

        assert_eq!(
            text,
            "celo (chain id 42220): 0x5555555555555555555555555555555555555555, balance 2 CELO\n\
             alfajores (chain id 44787): 0x5555555555555555555555555555555555555555, balance 0 CELO"
        );
    }
}
