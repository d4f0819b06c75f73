use std::error::Error;
use std::fmt;

/// Stable error codes shared across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    Unknown = 0,
    ConfigMissingEnv = 1_000,
    ConfigInvalidPrivateKey = 1_001,
    ConfigInvalidAddress = 1_002,
    ConfigInvalidRpcUrl = 1_003,
    ConfigInvalidValue = 1_004,
    RequestUnsupportedChain = 2_000,
    RequestUnsupportedOperation = 2_001,
    RequestInvalidAmount = 2_002,
    RequestInvalidSlippage = 2_003,
    RequestInvalidToken = 2_004,
    RequestInvalidAddress = 2_005,
    QuotePriceUnavailable = 2_100,
    QuoteDecimalsDefaulted = 2_101,
    TxBuildFailed = 2_200,
    TxTransferFailed = 2_201,
    OperationFailed = 2_300,
    WalletRpc = 3_000,
    WalletSigning = 3_001,
    WalletRevert = 3_002,
    WalletUnsupportedChain = 3_003,
    PluginGeneration = 4_000,
    PluginMalformedObject = 4_001,
    PluginUnknownAction = 4_002,
    PluginNotConfigured = 4_003,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({})", self.as_u16())
    }
}

/// Trait for errors that expose a stable error code.
pub trait CodedError: Error {
    fn code(&self) -> ErrorCode;

    fn retriable(&self) -> bool {
        false
    }
}

/// Helper error type for external sources that only provide strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalError(pub String);

impl fmt::Display for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ExternalError {}

impl From<String> for ExternalError {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExternalError {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Formats a coded error with its numeric identifier for user-facing messages.
pub fn format_with_code<E>(err: &E) -> String
where
    E: CodedError + fmt::Display,
{
    format!("{} (code={})", err, err.code().as_u16())
}
