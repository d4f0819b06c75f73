use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::chain::CeloChain;
use crate::utils::string_or_number;

/// Transfer as extracted from the conversation. Untrusted until validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_chain: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub to_address: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// What is being moved: native CELO (sent as call value) or an ERC20.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferAsset {
    Native,
    Erc20(Address),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferParams {
    pub chain: CeloChain,
    pub recipient: Address,
    pub asset: TransferAsset,
    pub amount: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferPlan {
    pub asset: TransferAsset,
    pub amount: U256,
    pub decimals: u8,
}
