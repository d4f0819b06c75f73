use alloy::primitives::{Address, B256, address};

use crate::chain::CeloChain;

// Mento Broker proxy; same address on mainnet and Alfajores.
const MENTO_BROKER: Address = address!("777a8255ca72412f0d706dc03c9d1987306b4cad");

/// Where Mento lives on one network. The broker is the allowance spender
/// and the swap entry point; `swapIn` also needs the exchange provider and
/// the exchange id of the pool to route through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentoDeployment {
    pub broker: Address,
    pub exchange_provider: Address,
    pub exchange_id: B256,
}

impl MentoDeployment {
    pub fn default_for(_chain: CeloChain) -> Self {
        Self {
            broker: MENTO_BROKER,
            exchange_provider: Address::ZERO,
            exchange_id: B256::ZERO,
        }
    }

    pub fn has_exchange(&self) -> bool {
        !self.exchange_provider.is_zero() && !self.exchange_id.is_zero()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentoDeployments {
    celo: MentoDeployment,
    alfajores: MentoDeployment,
}

impl MentoDeployments {
    pub fn get(&self, chain: CeloChain) -> &MentoDeployment {
        match chain {
            CeloChain::Celo => &self.celo,
            CeloChain::Alfajores => &self.alfajores,
        }
    }

    pub fn with(mut self, chain: CeloChain, deployment: MentoDeployment) -> Self {
        match chain {
            CeloChain::Celo => self.celo = deployment,
            CeloChain::Alfajores => self.alfajores = deployment,
        }
        self
    }
}

impl Default for MentoDeployments {
    fn default() -> Self {
        Self {
            celo: MentoDeployment::default_for(CeloChain::Celo),
            alfajores: MentoDeployment::default_for(CeloChain::Alfajores),
        }
    }
}
