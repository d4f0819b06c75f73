use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::chain::CeloChain;
use crate::error::ActionError;
use crate::mento::decimals::DecimalsResolution;
use crate::mento::slippage::Slippage;
use crate::utils::{opt_string_or_number, string_or_number};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Quote,
    Approve,
    Swap,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Quote => "quote",
            OperationKind::Approve => "approve",
            OperationKind::Swap => "swap",
        }
    }

    // Verb phrase for error messages: "failed to {describe}".
    pub fn describe(&self) -> &'static str {
        match self {
            OperationKind::Quote => "get quote",
            OperationKind::Approve => "increase trading allowance",
            OperationKind::Swap => "execute swap",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quote" => Ok(OperationKind::Quote),
            "approve" => Ok(OperationKind::Approve),
            "swap" => Ok(OperationKind::Swap),
            _ => Err(ActionError::UnsupportedOperation { operation: s.to_string() }),
        }
    }
}

/// Operation as extracted from the conversation. Untrusted until validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub chain: String,
    pub operation: String,
    pub from_token: String,
    pub to_token: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub slippage: Option<String>,
}

/// A validated request: chain, operation, tokens and slippage are typed.
/// `amount` stays textual until the token's decimals are known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentoParams {
    pub chain: CeloChain,
    pub operation: OperationKind,
    pub from_token: Address,
    pub to_token: Address,
    pub amount: String,
    pub slippage: Slippage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteResult {
    pub from_token: Address,
    pub to_token: Address,
    pub from_amount: U256,
    pub to_amount: U256,
    pub min_to_amount: U256,
    pub from_decimals: DecimalsResolution,
    pub to_decimals: DecimalsResolution,
}

impl QuoteResult {
    pub fn used_default_decimals(&self) -> bool {
        self.from_decimals.is_defaulted() || self.to_decimals.is_defaulted()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    pub hash: TxHash,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationOutcome {
    Quote(QuoteResult),
    Transaction(TransactionRecord),
}

impl OperationOutcome {
    pub fn as_quote(&self) -> Option<&QuoteResult> {
        match self {
            OperationOutcome::Quote(q) => Some(q),
            OperationOutcome::Transaction(_) => None,
        }
    }

    pub fn as_transaction(&self) -> Option<&TransactionRecord> {
        match self {
            OperationOutcome::Transaction(tx) => Some(tx),
            OperationOutcome::Quote(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_from_llm_json() {
        let raw = r#"{
            "operation": "swap",
            "chain": "celo",
            "fromToken": "CELO",
            "toToken": "cUSD",
            "amount": "2",
            "slippage": 0.5
        }"#;

        let request: OperationRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(request.operation, "swap");
        assert_eq!(request.from_token, "CELO");
        assert_eq!(request.to_token, "cUSD");
        assert_eq!(request.slippage.as_deref(), Some("0.5"));
    }

    #[test]
    fn operation_kind_parses_and_describes() {
        assert_eq!("Quote".parse::<OperationKind>().unwrap(), OperationKind::Quote);
        assert_eq!(OperationKind::Approve.describe(), "increase trading allowance");

        let err = "bridge".parse::<OperationKind>().unwrap_err();
        assert!(matches!(err, ActionError::UnsupportedOperation { ref operation } if operation == "bridge"));
    }
}
