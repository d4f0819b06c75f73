use std::str::FromStr;

use alloy::primitives::Address;
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::tokens::celo_token::CeloToken;
use celo_plugin_core::tokens::token_registry::TokenRegistry;
use log::info;

use crate::error::{ConnectorError, ConnectorResult};

pub const EXTRA_TOKENS_ENV: &str = "CELO_EXTRA_TOKENS";

// spec format: "chain:address:symbol"
fn split_spec(spec: &str) -> ConnectorResult<(String, String, String)> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(ConnectorError::invalid_input(format!(
            "invalid token spec `{spec}` (expected chain:address:symbol)"
        )));
    }
    Ok((parts[0].to_string(), parts[1].to_string(), parts[2].to_string()))
}

pub fn parse_token_spec(spec: &str) -> ConnectorResult<CeloToken> {
    let (chain, address, symbol) = split_spec(spec)?;

    let chain = CeloChain::from_str(&chain)
        .map_err(|e| ConnectorError::invalid_input(format!("token spec `{spec}`: {e}")))?;
    let address = Address::from_str(&address)
        .map_err(|e| ConnectorError::invalid_input(format!("invalid token address in `{spec}`: {e}")))?;

    Ok(CeloToken::new(chain, address, symbol))
}

/// Built-in Mento stables plus the given `chain:address:symbol` entries, as
/// listed in `CELO_EXTRA_TOKENS`:
///   CELO_EXTRA_TOKENS=celo:0x...:USDC,alfajores:0x...:USDC
pub fn registry_from_specs(specs: &[String]) -> ConnectorResult<TokenRegistry> {
    let extra = specs
        .iter()
        .map(|spec| parse_token_spec(spec))
        .collect::<ConnectorResult<Vec<_>>>()?;

    let mut registry = TokenRegistry::with_defaults();
    if !extra.is_empty() {
        info!("registering {} extra token(s)", extra.len());
    }
    registry.extend(extra);
    Ok(registry)
}
