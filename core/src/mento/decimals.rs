use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use celo_plugin_commons::diagnostics::Diagnostics;

use crate::chain::CeloChain;
use crate::error::ActionError;
use crate::wallet::actions::WalletActions;

pub const DEFAULT_DECIMALS: u8 = 18;

/// Outcome of a `decimals()` lookup. A failed read is not an error: the
/// caller gets the 18 decimal fallback plus the reason, and decides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecimalsResolution {
    Resolved(u8),
    Defaulted { reason: String },
}

impl DecimalsResolution {
    pub fn value(&self) -> u8 {
        match self {
            DecimalsResolution::Resolved(decimals) => *decimals,
            DecimalsResolution::Defaulted { .. } => DEFAULT_DECIMALS,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, DecimalsResolution::Defaulted { .. })
    }
}

pub struct DecimalsResolver {
    wallet: Arc<dyn WalletActions>,
    diagnostics: Arc<dyn Diagnostics>,
    // Only successful reads are memoized, so a flaky RPC is retried next call.
    cache: Mutex<HashMap<(CeloChain, Address), u8>>,
}

impl DecimalsResolver {
    pub fn new(wallet: Arc<dyn WalletActions>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            wallet,
            diagnostics,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, chain: CeloChain, token: Address) -> DecimalsResolution {
        if let Some(decimals) = self.cached(chain, token) {
            return DecimalsResolution::Resolved(decimals);
        }

        match self.wallet.read_decimals(chain, token).await {
            Ok(decimals) => {
                if let Ok(mut lock) = self.cache.lock() {
                    lock.insert((chain, token), decimals);
                }
                DecimalsResolution::Resolved(decimals)
            }
            Err(source) => {
                let err = ActionError::DecimalsResolutionFailed { token, chain, source };
                self.diagnostics
                    .warn(&format!("{err}; falling back to {DEFAULT_DECIMALS} decimals"));
                DecimalsResolution::Defaulted { reason: err.to_string() }
            }
        }
    }

    fn cached(&self, chain: CeloChain, token: Address) -> Option<u8> {
        let lock = self.cache.lock().ok()?;
        lock.get(&(chain, token)).copied()
    }
}
