use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// Networks the plugin can act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CeloChain {
    Celo,
    Alfajores,
}

impl CeloChain {
    pub const ALL: [CeloChain; 2] = [CeloChain::Celo, CeloChain::Alfajores];

    pub fn name(&self) -> &'static str {
        match self {
            CeloChain::Celo => "celo",
            CeloChain::Alfajores => "alfajores",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            CeloChain::Celo => 42_220,
            CeloChain::Alfajores => 44_787,
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            CeloChain::Celo => "https://forno.celo.org",
            CeloChain::Alfajores => "https://alfajores-forno.celo-testnet.org",
        }
    }

    pub fn native_symbol(&self) -> &'static str {
        "CELO"
    }

    // Used for env var suffixes: MENTO_BROKER_CELO, ...
    pub fn env_suffix(&self) -> &'static str {
        match self {
            CeloChain::Celo => "CELO",
            CeloChain::Alfajores => "ALFAJORES",
        }
    }

    pub fn supported_names() -> String {
        Self::ALL.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for CeloChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CeloChain {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "celo" => Ok(CeloChain::Celo),
            "alfajores" => Ok(CeloChain::Alfajores),
            _ => Err(ActionError::UnsupportedChain { chain: s.to_string() }),
        }
    }
}
