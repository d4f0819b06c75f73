use std::sync::Arc;

use celo_plugin_commons::diagnostics::{Diagnostics, LogDiagnostics};
use celo_plugin_connectors::backend::broker_oracle::BrokerPriceOracle;
use celo_plugin_connectors::backend::celo_backend::CeloBackendImpl;
use celo_plugin_connectors::backend::providers::connect_signed;
use celo_plugin_connectors::token_registry_loader::registry_from_specs;
use celo_plugin_core::mento::deployment::MentoDeployments;
use celo_plugin_core::mento::encoder::{CalldataEncoder, MentoCalldataEncoder};
use celo_plugin_core::mento::oracle::PriceOracle;
use celo_plugin_core::mento::router::MentoService;
use celo_plugin_core::tokens::token_registry::TokenRegistryTrait;
use celo_plugin_core::transfer::transfer_service::TransferService;
use celo_plugin_core::wallet::actions::WalletActions;
use log::info;

use crate::actions::mento::MentoAction;
use crate::actions::transfer::TransferAction;
use crate::actions::{Action, Callback, respond};
use crate::config::{Config, PRIVATE_KEY_ENV};
use crate::error::{PluginError, PluginResult};
use crate::runtime::{ActionResponse, AgentRuntime, ObjectGenerator, State};
use crate::wallet_provider::{WALLET_INFO_KEY, WalletInfoProvider};

pub const PLUGIN_NAME: &str = "celo";
pub const PLUGIN_DESCRIPTION: &str = "Celo blockchain integration: Mento quotes, approvals, swaps and token transfers";

/// The services behind the actions, sharing one wallet and decimals cache.
pub struct PluginServices {
    pub mento: Arc<MentoService>,
    pub transfer: Arc<TransferService>,
    pub wallet_info: Arc<WalletInfoProvider>,
}

impl PluginServices {
    pub fn new(
        wallet: Arc<dyn WalletActions>,
        oracle: Arc<dyn PriceOracle>,
        registry: Arc<dyn TokenRegistryTrait>,
        deployments: MentoDeployments,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let encoder: Arc<dyn CalldataEncoder> = Arc::new(MentoCalldataEncoder);
        let wallet_info = WalletInfoProvider::new(wallet.clone());
        let mento = MentoService::new(
            wallet.clone(),
            oracle,
            encoder.clone(),
            registry.clone(),
            deployments,
            diagnostics.clone(),
        );
        let transfer = TransferService::new(wallet, mento.decimals(), registry, encoder, diagnostics);

        Self {
            mento: Arc::new(mento),
            transfer: Arc::new(transfer),
            wallet_info: Arc::new(wallet_info),
        }
    }

    /// Wires the alloy backend, broker oracle and token registry from config.
    pub fn connect(config: &Config) -> PluginResult<Self> {
        let providers = connect_signed(&config.signer, &config.rpc_endpoints)?;
        let wallet = CeloBackendImpl::new(providers.clone(), config.signer.address());
        let oracle = BrokerPriceOracle::new(providers, config.deployments.clone(), config.fixed_rate.clone());
        let registry = registry_from_specs(&config.extra_tokens)?;

        info!(
            "celo plugin connected as {:#x} with {} chain(s)",
            config.signer.address(),
            config.rpc_endpoints.len()
        );

        Ok(Self::new(
            Arc::new(wallet),
            Arc::new(oracle),
            Arc::new(registry),
            config.deployments.clone(),
            LogDiagnostics::shared("celo_plugin"),
        ))
    }
}

pub struct CeloPlugin {
    actions: Vec<Arc<dyn Action>>,
    wallet_info: Arc<WalletInfoProvider>,
}

impl CeloPlugin {
    pub fn new(services: &PluginServices, generator: Arc<dyn ObjectGenerator>) -> Self {
        let actions: Vec<Arc<dyn Action>> = vec![
            Arc::new(TransferAction::new(services.transfer.clone(), generator.clone())),
            Arc::new(MentoAction::new(services.mento.clone(), generator)),
        ];
        Self {
            actions,
            wallet_info: services.wallet_info.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn description(&self) -> &'static str {
        PLUGIN_DESCRIPTION
    }

    pub fn actions(&self) -> &[Arc<dyn Action>] {
        &self.actions
    }

    /// Looks an action up by name or simile, case-insensitively.
    pub fn action(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions
            .iter()
            .find(|action| action.descriptor().answers_to(name))
            .cloned()
    }

    /// Adds the provider values the templates reference, keeping any the
    /// caller already supplied.
    pub async fn compose_state(&self, state: &State) -> State {
        let mut state = state.clone();
        if !state.contains_key(WALLET_INFO_KEY) {
            let info = self.wallet_info.describe().await;
            state.insert(WALLET_INFO_KEY.to_string(), info);
        }
        state
    }

    /// Resolves `name`, checks the runtime can sign, then runs the action
    /// with the composed state.
    pub async fn run(&self, name: &str, runtime: &dyn AgentRuntime, state: &State) -> PluginResult<ActionResponse> {
        let action = self.action(name).ok_or_else(|| PluginError::UnknownAction {
            name: name.to_string(),
        })?;
        if !action.validate(runtime) {
            return Err(PluginError::NotConfigured {
                action: action.descriptor().name,
                setting: PRIVATE_KEY_ENV,
            });
        }

        let state = self.compose_state(state).await;
        action.run(&state).await
    }

    pub async fn handle(
        &self,
        name: &str,
        runtime: &dyn AgentRuntime,
        state: &State,
        callback: Option<Callback<'_>>,
    ) -> bool {
        respond(name, self.run(name, runtime, state).await, callback)
    }
}
