use std::sync::Arc;

use async_trait::async_trait;
use celo_plugin_core::transfer::model::TransferRequest;
use celo_plugin_core::transfer::transfer_service::TransferService;
use log::info;
use serde_json::json;

use crate::actions::{Action, ActionDescriptor, ActionExample, prompt_state};
use crate::context::{compose_context, parse_generated};
use crate::error::{PluginError, PluginResult};
use crate::runtime::{ActionResponse, ModelClass, ObjectGenerator, State};
use crate::templates::TRANSFER_TEMPLATE;

pub const TRANSFER_ACTION: ActionDescriptor = ActionDescriptor {
    name: "SEND_TOKENS",
    description: "Transfer CELO or an ERC20 token to an address on Celo",
    similes: &["TRANSFER_TOKENS", "TRANSFER", "SEND_CELO", "PAY"],
    examples: &[
        ActionExample {
            user: "user",
            text: "Send 1 CELO to 0x742d35Cc6634C0532925a3b844Bc454e4438f44e on alfajores",
            action: "SEND_TOKENS",
        },
        ActionExample {
            user: "user",
            text: "Transfer 25 cUSD to 0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
            action: "SEND_TOKENS",
        },
    ],
};

pub struct TransferAction {
    service: Arc<TransferService>,
    generator: Arc<dyn ObjectGenerator>,
}

impl TransferAction {
    pub fn new(service: Arc<TransferService>, generator: Arc<dyn ObjectGenerator>) -> Self {
        Self { service, generator }
    }

    pub async fn run_request(&self, request: &TransferRequest) -> PluginResult<ActionResponse> {
        let record = self.service.transfer(request).await?;
        let token = request.token.as_deref().unwrap_or("CELO");
        info!("transfer of {} {token} on {} sent", request.amount, request.from_chain);

        Ok(ActionResponse {
            text: format!(
                "Successfully transferred {} {token} to {}\nTransaction Hash: {:#x}",
                request.amount, request.to_address, record.hash
            ),
            content: json!({
                "success": true,
                "chain": request.from_chain.trim().to_ascii_lowercase(),
                "hash": format!("{:#x}", record.hash),
                "amount": request.amount,
                "token": token,
                "recipient": format!("{:#x}", record.to),
            }),
        })
    }
}

#[async_trait]
impl Action for TransferAction {
    fn descriptor(&self) -> &ActionDescriptor {
        &TRANSFER_ACTION
    }

    async fn run(&self, state: &State) -> PluginResult<ActionResponse> {
        let context = compose_context(TRANSFER_TEMPLATE, &prompt_state(state));
        let object = self
            .generator
            .generate_object(&context, ModelClass::Small)
            .await
            .map_err(PluginError::generation("transfer"))?;

        let request: TransferRequest = parse_generated(object)?;
        self.run_request(&request).await
    }
}
