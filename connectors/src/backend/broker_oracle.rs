use alloy::network::AnyNetwork;
use alloy::primitives::U256;
use alloy::providers::Provider;
use async_trait::async_trait;
use celo_plugin_commons::error::ExternalError;
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::mento::deployment::MentoDeployments;
use celo_plugin_core::mento::encoder::IBroker;
use celo_plugin_core::mento::oracle::{FixedRateOracle, PriceOracle, SwapLeg};
use log::debug;

use crate::backend::providers::ChainProviders;

/// Prices through `Broker.getAmountOut` on chains with a configured
/// exchange, and through the fixed rate everywhere else.
pub struct BrokerPriceOracle<P> {
    providers: ChainProviders<P>,
    deployments: MentoDeployments,
    fallback: FixedRateOracle,
}

impl<P> BrokerPriceOracle<P> {
    pub fn new(providers: ChainProviders<P>, deployments: MentoDeployments, fallback: FixedRateOracle) -> Self {
        Self {
            providers,
            deployments,
            fallback,
        }
    }
}

#[async_trait]
impl<P> PriceOracle for BrokerPriceOracle<P>
where
    P: Provider<AnyNetwork> + Send + Sync + Clone + 'static,
{
    async fn amount_out(
        &self,
        chain: CeloChain,
        token_in: SwapLeg,
        token_out: SwapLeg,
        amount_in: U256,
    ) -> Result<U256, ExternalError> {
        let deployment = self.deployments.get(chain);
        if !deployment.has_exchange() {
            debug!("no mento exchange on {chain}, pricing at the fixed rate");
            return self.fallback.amount_out(chain, token_in, token_out, amount_in).await;
        }

        let provider = self.providers.get(chain).map_err(|e| ExternalError(e.to_string()))?;
        let broker = IBroker::new(deployment.broker, provider.clone());

        broker
            .getAmountOut(
                deployment.exchange_provider,
                deployment.exchange_id,
                token_in.token,
                token_out.token,
                amount_in,
            )
            .call()
            .await
            .map_err(|e| ExternalError(format!("broker getAmountOut failed: {e}")))
    }
}
