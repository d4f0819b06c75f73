use std::collections::HashMap;

use alloy::primitives::{Address, address};

use crate::chain::CeloChain;
use crate::error::{ActionError, ActionResult};
use crate::tokens::celo_token::CeloToken;

// In-memory registry of the tokens the agent can name by symbol.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<(CeloChain, String), CeloToken>,
}

#[mockall::automock]
pub trait TokenRegistryTrait: Send + Sync {
    fn by_symbol(&self, chain: CeloChain, symbol: &str) -> Option<CeloToken>;
    fn by_address(&self, chain: CeloChain, address: Address) -> Option<CeloToken>;
    fn all(&self, chain: CeloChain) -> Vec<CeloToken>;
}

impl TokenRegistry {
    pub fn new(tokens: Vec<CeloToken>) -> Self {
        let mut registry = Self::default();
        registry.extend(tokens);
        registry
    }

    /// CELO and the Mento stable tokens on both networks.
    pub fn with_defaults() -> Self {
        let mut tokens = Vec::new();
        for chain in CeloChain::ALL {
            for (symbol, address) in default_tokens(chain) {
                tokens.push(CeloToken::new(chain, *address, *symbol));
            }
        }
        Self::new(tokens)
    }

    // Later entries replace earlier ones with the same chain and symbol.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = CeloToken>) {
        for token in tokens {
            self.tokens.insert((token.chain, token.symbol_key()), token);
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenRegistryTrait for TokenRegistry {
    fn by_symbol(&self, chain: CeloChain, symbol: &str) -> Option<CeloToken> {
        self.tokens
            .get(&(chain, symbol.trim().to_ascii_uppercase()))
            .cloned()
    }

    fn by_address(&self, chain: CeloChain, address: Address) -> Option<CeloToken> {
        self.tokens
            .values()
            .find(|t| t.chain == chain && t.address == address)
            .cloned()
    }

    fn all(&self, chain: CeloChain) -> Vec<CeloToken> {
        let mut tokens: Vec<CeloToken> = self.tokens.values().filter(|t| t.chain == chain).cloned().collect();
        tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        tokens
    }
}

/// Resolves a token given either as a `0x` address or as a registry symbol.
pub fn resolve_token(registry: &dyn TokenRegistryTrait, chain: CeloChain, token: &str) -> ActionResult<Address> {
    let trimmed = token.trim();
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        return trimmed.parse::<Address>().map_err(|_| ActionError::InvalidToken {
            token: token.to_string(),
            chain,
        });
    }

    registry
        .by_symbol(chain, trimmed)
        .map(|t| t.address)
        .ok_or_else(|| ActionError::InvalidToken {
            token: token.to_string(),
            chain,
        })
}

fn default_tokens(chain: CeloChain) -> &'static [(&'static str, Address)] {
    const CELO_MAINNET: [(&str, Address); 4] = [
        ("CELO", address!("471ece3750da237f93b8e339c536989b8978a438")),
        ("cUSD", address!("765de816845861e75a25fca122bb6898b8b1282a")),
        ("cEUR", address!("d8763cba276a3738e6de85b4b3bf5fded6d6ca73")),
        ("cREAL", address!("e8537a3d056da446677b9e9d6c5db704eaab4787")),
    ];
    const ALFAJORES: [(&str, Address); 4] = [
        ("CELO", address!("f194afdf50b03e69bd7d057c1aa9e10c9954e4c9")),
        ("cUSD", address!("874069fa1eb16d44d622f2e0ca25eea172369bc1")),
        ("cEUR", address!("10c892a6ec43a53e45d0b916b4b7d383b1b78c0f")),
        ("cREAL", address!("e4d517785d091d3c54818832db6094bcc2744545")),
    ];

    match chain {
        CeloChain::Celo => &CELO_MAINNET,
        CeloChain::Alfajores => &ALFAJORES,
    }
}
