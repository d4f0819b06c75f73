use std::env;
use std::str::FromStr;

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use celo_plugin_commons::env::split_list;
use celo_plugin_commons::error::{CodedError, ErrorCode, ExternalError};
use celo_plugin_connectors::backend::providers::RpcEndpoint;
use celo_plugin_connectors::token_registry_loader::EXTRA_TOKENS_ENV;
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::mento::deployment::{MentoDeployment, MentoDeployments};
use celo_plugin_core::mento::oracle::FixedRateOracle;
use log::debug;
use thiserror::Error;

pub const PRIVATE_KEY_ENV: &str = "EVM_PRIVATE_KEY";
pub const FIXED_RATE_ENV: &str = "MENTO_FIXED_RATE";

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingEnv { var: String },
    #[error("{var} is not a valid private key")]
    InvalidPrivateKey {
        var: &'static str,
        #[source]
        source: ExternalError,
    },
    #[error("{var} is not a valid address: `{value}`")]
    InvalidAddress { var: String, value: String },
    #[error("{var} is not a valid rpc url: `{value}`")]
    InvalidRpcUrl { var: String, value: String },
    #[error("invalid value for {var}")]
    InvalidValue {
        var: String,
        #[source]
        source: ExternalError,
    },
}

impl CodedError for ConfigError {
    fn code(&self) -> ErrorCode {
        match self {
            ConfigError::MissingEnv { .. } => ErrorCode::ConfigMissingEnv,
            ConfigError::InvalidPrivateKey { .. } => ErrorCode::ConfigInvalidPrivateKey,
            ConfigError::InvalidAddress { .. } => ErrorCode::ConfigInvalidAddress,
            ConfigError::InvalidRpcUrl { .. } => ErrorCode::ConfigInvalidRpcUrl,
            ConfigError::InvalidValue { .. } => ErrorCode::ConfigInvalidValue,
        }
    }
}

pub struct Config {
    pub signer: PrivateKeySigner,
    pub rpc_endpoints: Vec<RpcEndpoint>,
    pub deployments: MentoDeployments,
    pub fixed_rate: FixedRateOracle,
    /// `chain:address:symbol` entries added on top of the built-in tokens.
    pub extra_tokens: Vec<String>,
}

impl Config {
    pub fn load() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let private_key = get(PRIVATE_KEY_ENV).ok_or_else(|| ConfigError::MissingEnv {
            var: PRIVATE_KEY_ENV.to_string(),
        })?;
        let signer = parse_signer(&private_key)?;
        debug!("signer address {:#x}", signer.address());

        let mut rpc_endpoints = Vec::with_capacity(CeloChain::ALL.len());
        let mut deployments = MentoDeployments::default();
        for chain in CeloChain::ALL {
            let var = format!("{}_RPC_URL", chain.env_suffix());
            let url = get(&var).unwrap_or_else(|| chain.default_rpc_url().to_string());
            if Url::parse(&url).is_err() {
                return Err(ConfigError::InvalidRpcUrl { var, value: url });
            }
            rpc_endpoints.push(RpcEndpoint::new(chain, url));

            deployments = deployments.with(chain, load_deployment(chain, &get)?);
        }

        let fixed_rate = match get(FIXED_RATE_ENV) {
            Some(raw) => FixedRateOracle::parse(&raw).map_err(|source| ConfigError::InvalidValue {
                var: FIXED_RATE_ENV.to_string(),
                source,
            })?,
            None => FixedRateOracle::parity(),
        };

        let extra_tokens = get(EXTRA_TOKENS_ENV)
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        Ok(Config {
            signer,
            rpc_endpoints,
            deployments,
            fixed_rate,
            extra_tokens,
        })
    }
}

/// Cheap shape check used before the key is parsed.
pub fn looks_like_private_key(value: &str) -> bool {
    value.starts_with("0x")
}

fn parse_signer(raw: &str) -> ConfigResult<PrivateKeySigner> {
    if !looks_like_private_key(raw) {
        return Err(ConfigError::InvalidPrivateKey {
            var: PRIVATE_KEY_ENV,
            source: ExternalError::from("expected a 0x-prefixed hex key"),
        });
    }
    PrivateKeySigner::from_str(raw).map_err(|e| ConfigError::InvalidPrivateKey {
        var: PRIVATE_KEY_ENV,
        source: ExternalError(e.to_string()),
    })
}

// MENTO_BROKER_<CHAIN>, MENTO_EXCHANGE_PROVIDER_<CHAIN>, MENTO_EXCHANGE_ID_<CHAIN>
fn load_deployment<G>(chain: CeloChain, get: &G) -> ConfigResult<MentoDeployment>
where
    G: Fn(&str) -> Option<String>,
{
    let defaults = MentoDeployment::default_for(chain);
    let suffix = chain.env_suffix();

    let address = |name: &str, default: Address| -> ConfigResult<Address> {
        let var = format!("{name}_{suffix}");
        match get(&var) {
            Some(value) => Address::from_str(&value).map_err(|_| ConfigError::InvalidAddress { var, value }),
            None => Ok(default),
        }
    };

    let exchange_id_var = format!("MENTO_EXCHANGE_ID_{suffix}");
    let exchange_id = match get(&exchange_id_var) {
        Some(value) => B256::from_str(&value).map_err(|e| ConfigError::InvalidValue {
            var: exchange_id_var,
            source: ExternalError(format!("`{value}`: {e}")),
        })?,
        None => defaults.exchange_id,
    };

    Ok(MentoDeployment {
        broker: address("MENTO_BROKER", defaults.broker)?,
        exchange_provider: address("MENTO_EXCHANGE_PROVIDER", defaults.exchange_provider)?,
        exchange_id,
    })
}
