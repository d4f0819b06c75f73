use std::collections::HashMap;

use alloy::network::{AnyNetwork, EthereumWallet};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::error::WalletError;
use log::info;

use crate::error::{ConnectorError, ConnectorResult};

pub type CeloProvider = DynProvider<AnyNetwork>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub chain: CeloChain,
    pub url: String,
}

impl RpcEndpoint {
    pub fn new(chain: CeloChain, url: impl Into<String>) -> Self {
        Self { chain, url: url.into() }
    }
}

/// One provider per configured network. Callers name the chain on every
/// lookup; there is no "active" chain.
#[derive(Clone, Debug)]
pub struct ChainProviders<P> {
    providers: HashMap<CeloChain, P>,
}

impl<P> ChainProviders<P> {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn with(mut self, chain: CeloChain, provider: P) -> Self {
        self.providers.insert(chain, provider);
        self
    }

    pub fn get(&self, chain: CeloChain) -> Result<&P, WalletError> {
        self.providers.get(&chain).ok_or(WalletError::UnsupportedChain { chain })
    }

    pub fn chains(&self) -> Vec<CeloChain> {
        CeloChain::ALL
            .iter()
            .copied()
            .filter(|chain| self.providers.contains_key(chain))
            .collect()
    }
}

impl<P> Default for ChainProviders<P> {
    fn default() -> Self {
        Self::new()
    }
}

// Build a wallet-backed provider per endpoint, all signing with the same key.
pub fn connect_signed(
    signer: &PrivateKeySigner,
    endpoints: &[RpcEndpoint],
) -> ConnectorResult<ChainProviders<CeloProvider>> {
    let wallet = EthereumWallet::from(signer.clone());
    let mut providers = ChainProviders::new();

    for endpoint in endpoints {
        let url = endpoint.url.parse().map_err(|_| ConnectorError::InvalidRpcUrl {
            chain: endpoint.chain.to_string(),
            url: endpoint.url.clone(),
        })?;

        let provider = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .wallet(wallet.clone())
            .connect_http(url)
            .erased();

        info!("connected {} rpc at {}", endpoint.chain, endpoint.url);
        providers = providers.with(endpoint.chain, provider);
    }

    Ok(providers)
}
