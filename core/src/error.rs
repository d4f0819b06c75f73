use alloy::primitives::Address;
use celo_plugin_commons::error::{CodedError, ErrorCode, ExternalError, format_with_code};
use thiserror::Error;

use crate::chain::CeloChain;
use crate::mento::model::OperationKind;

pub type ActionResult<T> = Result<T, ActionError>;

/// Failures reported by the wallet/RPC collaborator.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("rpc: {0}")]
    Rpc(String),

    #[error("signing: {0}")]
    Signing(String),

    #[error("revert: {0}")]
    Revert(String),

    #[error("no client configured for chain {chain}")]
    UnsupportedChain { chain: CeloChain },

    #[error("no account available on {chain}")]
    NoAccount { chain: CeloChain },

    #[error("other: {0}")]
    Other(String),
}

impl CodedError for WalletError {
    fn code(&self) -> ErrorCode {
        match self {
            WalletError::Rpc(_) | WalletError::Other(_) => ErrorCode::WalletRpc,
            WalletError::Signing(_) | WalletError::NoAccount { .. } => ErrorCode::WalletSigning,
            WalletError::Revert(_) => ErrorCode::WalletRevert,
            WalletError::UnsupportedChain { .. } => ErrorCode::WalletUnsupportedChain,
        }
    }

    fn retriable(&self) -> bool {
        matches!(self, WalletError::Rpc(_))
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unsupported chain `{chain}`; use only 'celo' or 'alfajores'")]
    UnsupportedChain { chain: String },

    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("invalid amount `{amount}` at {decimals} decimals: {reason}")]
    InvalidAmount { amount: String, decimals: u8, reason: String },

    #[error("invalid slippage `{slippage}`: expected a percentage between 0 and 100")]
    InvalidSlippage { slippage: String },

    #[error("unknown token `{token}` on {chain}")]
    InvalidToken { token: String, chain: CeloChain },

    #[error("invalid {field} address `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("price unavailable for {token_in} -> {token_out}: {source}")]
    PriceUnavailable {
        token_in: Address,
        token_out: Address,
        #[source]
        source: ExternalError,
    },

    #[error("failed to read decimals of {token} on {chain}: {source}")]
    DecimalsResolutionFailed {
        token: Address,
        chain: CeloChain,
        #[source]
        source: WalletError,
    },

    #[error("no mento exchange configured on {chain}")]
    ExchangeNotConfigured { chain: CeloChain },

    #[error("wallet error: {source}")]
    Wallet {
        #[from]
        source: WalletError,
    },

    #[error("failed to build {operation} transaction: {source}")]
    TransactionBuildFailed {
        operation: OperationKind,
        #[source]
        source: Box<ActionError>,
    },

    #[error("transfer failed: {source}")]
    TransferFailed {
        #[source]
        source: Box<ActionError>,
    },

    #[error("failed to {}: {source}", .operation.describe())]
    OperationFailed {
        operation: OperationKind,
        #[source]
        source: Box<ActionError>,
    },
}

impl ActionError {
    pub fn build_failed(operation: OperationKind) -> impl FnOnce(ActionError) -> ActionError {
        move |source| ActionError::TransactionBuildFailed {
            operation,
            source: Box::new(source),
        }
    }

    pub fn operation_failed(operation: OperationKind) -> impl FnOnce(ActionError) -> ActionError {
        move |source| ActionError::OperationFailed {
            operation,
            source: Box::new(source),
        }
    }

    pub fn transfer_failed(source: ActionError) -> ActionError {
        ActionError::TransferFailed {
            source: Box::new(source),
        }
    }

    /// Innermost error once the context wrappers are peeled off.
    pub fn root(&self) -> &ActionError {
        match self {
            ActionError::TransactionBuildFailed { source, .. }
            | ActionError::TransferFailed { source }
            | ActionError::OperationFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

impl CodedError for ActionError {
    fn code(&self) -> ErrorCode {
        match self {
            ActionError::UnsupportedChain { .. } => ErrorCode::RequestUnsupportedChain,
            ActionError::UnsupportedOperation { .. } => ErrorCode::RequestUnsupportedOperation,
            ActionError::InvalidAmount { .. } => ErrorCode::RequestInvalidAmount,
            ActionError::InvalidSlippage { .. } => ErrorCode::RequestInvalidSlippage,
            ActionError::InvalidToken { .. } => ErrorCode::RequestInvalidToken,
            ActionError::InvalidAddress { .. } => ErrorCode::RequestInvalidAddress,
            ActionError::PriceUnavailable { .. } => ErrorCode::QuotePriceUnavailable,
            ActionError::DecimalsResolutionFailed { .. } => ErrorCode::QuoteDecimalsDefaulted,
            ActionError::ExchangeNotConfigured { .. } => ErrorCode::TxBuildFailed,
            ActionError::Wallet { source } => source.code(),
            ActionError::TransactionBuildFailed { .. } => ErrorCode::TxBuildFailed,
            ActionError::TransferFailed { .. } => ErrorCode::TxTransferFailed,
            ActionError::OperationFailed { .. } => ErrorCode::OperationFailed,
        }
    }

    fn retriable(&self) -> bool {
        match self.root() {
            ActionError::Wallet { source } => source.retriable(),
            ActionError::PriceUnavailable { .. } => true,
            _ => false,
        }
    }
}

impl From<ActionError> for String {
    fn from(value: ActionError) -> Self {
        format_with_code(&value)
    }
}
