use celo_plugin_commons::error::{CodedError, ErrorCode, ExternalError, format_with_code};
use thiserror::Error;

pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("invalid rpc url `{url}` for {chain}")]
    InvalidRpcUrl { chain: String, url: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ConnectorError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ConnectorError::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<ConnectorError> for ExternalError {
    fn from(value: ConnectorError) -> Self {
        ExternalError(value.to_string())
    }
}

impl From<ConnectorError> for String {
    fn from(value: ConnectorError) -> Self {
        format_with_code(&value)
    }
}

impl CodedError for ConnectorError {
    fn code(&self) -> ErrorCode {
        match self {
            ConnectorError::InvalidRpcUrl { .. } => ErrorCode::ConfigInvalidRpcUrl,
            ConnectorError::InvalidInput { .. } => ErrorCode::ConfigInvalidValue,
        }
    }
}
