use std::fmt;

use alloy::primitives::Address;

use crate::chain::CeloChain;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CeloToken {
    pub chain: CeloChain,
    pub address: Address,
    pub symbol: String,
}

impl CeloToken {
    pub fn new(chain: CeloChain, address: Address, symbol: impl Into<String>) -> Self {
        Self {
            chain,
            address,
            symbol: symbol.into(),
        }
    }

    // Registry key; symbols are matched case-insensitively ("cusd" == "cUSD").
    pub fn symbol_key(&self) -> String {
        self.symbol.to_ascii_uppercase()
    }
}

impl fmt::Display for CeloToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // format: CELO[chain]:symbol@address
        write!(f, "CELO[{}]:{}@{:#x}", self.chain, self.symbol, self.address)
    }
}
