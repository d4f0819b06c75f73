use celo_plugin_commons::error::{CodedError, ErrorCode, ExternalError};
use celo_plugin_connectors::error::ConnectorError;
use celo_plugin_core::error::ActionError;
use thiserror::Error;

use crate::config::ConfigError;

pub type PluginResult<T> = Result<T, PluginError>;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Connector(#[from] ConnectorError),
    #[error("failed to generate {what} from the conversation: {source}")]
    Generation {
        what: &'static str,
        #[source]
        source: ExternalError,
    },
    #[error("malformed request object: {reason}")]
    MalformedObject { reason: String },
    #[error("unknown action `{name}`")]
    UnknownAction { name: String },
    #[error("{action} is unavailable: setting {setting} is missing or not a 0x-prefixed key")]
    NotConfigured {
        action: &'static str,
        setting: &'static str,
    },
}

impl PluginError {
    pub fn generation<E>(what: &'static str) -> impl FnOnce(E) -> Self
    where
        E: Into<ExternalError>,
    {
        move |err| PluginError::Generation {
            what,
            source: err.into(),
        }
    }
}

impl CodedError for PluginError {
    fn code(&self) -> ErrorCode {
        match self {
            PluginError::Config(err) => err.code(),
            PluginError::Action(err) => err.code(),
            PluginError::Connector(err) => err.code(),
            PluginError::Generation { .. } => ErrorCode::PluginGeneration,
            PluginError::MalformedObject { .. } => ErrorCode::PluginMalformedObject,
            PluginError::UnknownAction { .. } => ErrorCode::PluginUnknownAction,
            PluginError::NotConfigured { .. } => ErrorCode::PluginNotConfigured,
        }
    }

    fn retriable(&self) -> bool {
        match self {
            PluginError::Action(err) => err.retriable(),
            PluginError::Generation { .. } => true,
            _ => false,
        }
    }
}
