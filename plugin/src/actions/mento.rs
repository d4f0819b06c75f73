use std::sync::Arc;

use async_trait::async_trait;
use celo_plugin_core::mento::model::{
    MentoParams, OperationKind, OperationOutcome, OperationRequest, QuoteResult, TransactionRecord,
};
use celo_plugin_core::mento::router::MentoService;
use celo_plugin_core::tokens::token_amount::format_units;
use log::info;
use serde_json::{Value, json};

use crate::actions::{Action, ActionDescriptor, ActionExample, prompt_state};
use crate::context::{compose_context, parse_generated};
use crate::error::{PluginError, PluginResult};
use crate::runtime::{ActionResponse, ModelClass, ObjectGenerator, State};
use crate::templates::MENTO_TEMPLATE;

pub const MENTO_ACTION: ActionDescriptor = ActionDescriptor {
    name: "MENTO_OPERATION",
    description: "Quote, approve or swap tokens through the Mento Protocol on Celo",
    similes: &["MENTO", "MENTO_SWAP", "MENTO_QUOTE", "MENTO_APPROVE"],
    examples: &[
        ActionExample {
            user: "user",
            text: "Get a quote for swapping 1 CELO to cUSD on Mento",
            action: "MENTO_OPERATION",
        },
        ActionExample {
            user: "user",
            text: "Approve 5 CELO for trading on Mento",
            action: "MENTO_OPERATION",
        },
        ActionExample {
            user: "user",
            text: "Swap 2 CELO for cUSD using Mento protocol with 0.5% slippage",
            action: "MENTO_OPERATION",
        },
    ],
};

pub struct MentoAction {
    service: Arc<MentoService>,
    generator: Arc<dyn ObjectGenerator>,
}

impl MentoAction {
    pub fn new(service: Arc<MentoService>, generator: Arc<dyn ObjectGenerator>) -> Self {
        Self { service, generator }
    }

    pub async fn run_request(&self, request: &OperationRequest) -> PluginResult<ActionResponse> {
        let params = self.service.validate(request)?;
        let outcome = self.service.execute_validated(&params).await?;
        info!("mento {} on {} done", params.operation, params.chain);
        Ok(render(request, &params, &outcome))
    }
}

#[async_trait]
impl Action for MentoAction {
    fn descriptor(&self) -> &ActionDescriptor {
        &MENTO_ACTION
    }

    async fn run(&self, state: &State) -> PluginResult<ActionResponse> {
        let context = compose_context(MENTO_TEMPLATE, &prompt_state(state));
        let object = self
            .generator
            .generate_object(&context, ModelClass::Large)
            .await
            .map_err(PluginError::generation("mento operation"))?;

        let request: OperationRequest = parse_generated(object)?;
        self.run_request(&request).await
    }
}

fn render(request: &OperationRequest, params: &MentoParams, outcome: &OperationOutcome) -> ActionResponse {
    match outcome {
        OperationOutcome::Quote(quote) => render_quote(request, params, quote),
        OperationOutcome::Transaction(tx) => render_transaction(request, params, tx),
    }
}

fn render_quote(request: &OperationRequest, params: &MentoParams, quote: &QuoteResult) -> ActionResponse {
    let to_decimals = quote.to_decimals.value();
    let expected = format_units(quote.to_amount, to_decimals);
    let minimum = format_units(quote.min_to_amount, to_decimals);

    let mut text = format!(
        "Quote for {} {}:\nExpected output: {} {}\nMinimum output (with {}% slippage): {} {}",
        request.amount, request.from_token, expected, request.to_token, params.slippage, minimum, request.to_token
    );

    let warnings = decimals_warnings(quote);
    for warning in &warnings {
        text.push_str("\nWarning: ");
        text.push_str(warning.as_str().unwrap_or_default());
    }

    ActionResponse {
        text,
        content: json!({
            "success": true,
            "operation": params.operation.as_str(),
            "chain": params.chain.name(),
            "fromAmount": quote.from_amount.to_string(),
            "toAmount": quote.to_amount.to_string(),
            "minToAmount": quote.min_to_amount.to_string(),
            "toDecimals": to_decimals,
            "warnings": warnings,
        }),
    }
}

fn render_transaction(request: &OperationRequest, params: &MentoParams, tx: &TransactionRecord) -> ActionResponse {
    let headline = match params.operation {
        OperationKind::Swap => format!(
            "Successfully swapped {} {} for {}",
            request.amount, request.from_token, request.to_token
        ),
        _ => format!(
            "Successfully approved {} {} for Mento protocol",
            request.amount, request.from_token
        ),
    };

    ActionResponse {
        text: format!("{headline}\nTransaction Hash: {:#x}", tx.hash),
        content: json!({
            "success": true,
            "operation": params.operation.as_str(),
            "chain": params.chain.name(),
            "hash": format!("{:#x}", tx.hash),
            "from": format!("{:#x}", tx.from),
            "to": format!("{:#x}", tx.to),
        }),
    }
}

fn decimals_warnings(quote: &QuoteResult) -> Vec<Value> {
    [
        ("input", &quote.from_decimals, quote.from_token),
        ("output", &quote.to_decimals, quote.to_token),
    ]
    .into_iter()
    .filter(|(_, decimals, _)| decimals.is_defaulted())
    .map(|(side, decimals, token)| {
        Value::String(format!(
            "decimals of {side} token {token:#x} could not be read, assumed {}",
            decimals.value()
        ))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockObjectGenerator;
    use alloy::primitives::{Address, B256, TxHash, address, b256};
    use celo_plugin_commons::diagnostics::RecordingDiagnostics;
    use celo_plugin_commons::error::ExternalError;
    use celo_plugin_core::chain::CeloChain;
    use celo_plugin_core::error::WalletError;
    use celo_plugin_core::mento::deployment::{MentoDeployment, MentoDeployments};
    use celo_plugin_core::mento::encoder::MentoCalldataEncoder;
    use celo_plugin_core::mento::oracle::FixedRateOracle;
    use celo_plugin_core::tokens::token_registry::TokenRegistry;
    use celo_plugin_core::wallet::actions::MockWalletActions;

    const SIGNER: Address = address!("5555555555555555555555555555555555555555");
    const HASH: TxHash = b256!("0909090909090909090909090909090909090909090909090909090909090909");

    fn service(wallet: MockWalletActions) -> Arc<MentoService> {
        let deployment = MentoDeployment {
            exchange_provider: address!("3333333333333333333333333333333333333333"),
            exchange_id: B256::repeat_byte(0x11),
            ..MentoDeployment::default_for(CeloChain::Celo)
        };
        Arc::new(MentoService::new(
            Arc::new(wallet),
            Arc::new(FixedRateOracle::parity()),
            Arc::new(MentoCalldataEncoder),
            Arc::new(TokenRegistry::with_defaults()),
            MentoDeployments::default().with(CeloChain::Celo, deployment),
            Arc::new(RecordingDiagnostics::new()),
        ))
    }

    fn generator(object: Value) -> MockObjectGenerator {
        let mut generator = MockObjectGenerator::new();
        generator
            .expect_generate_object()
            .withf(|context, model| context.contains("celo, alfajores") && *model == ModelClass::Large)
            .times(1)
            .returning(move |_, _| Ok(object.clone()));
        generator
    }

    async fn handle(action: &MentoAction) -> (bool, Vec<ActionResponse>) {
        let mut responses = Vec::new();
        let mut callback = |response: ActionResponse| responses.push(response);
        let ok = action.handle(&State::new(), Some(&mut callback)).await;
        (ok, responses)
    }

    #[tokio::test]
    async fn quote_reports_expected_and_minimum_output() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().returning(|_, _| Ok(18));
        wallet.expect_send_transaction().never();
        let object = json!({
            "operation": "quote",
            "chain": "celo",
            "fromToken": "CELO",
            "toToken": "cUSD",
            "amount": "10",
            "slippage": 1
        });
        let action = MentoAction::new(service(wallet), Arc::new(generator(object)));

        // when
        let (ok, responses) = handle(&action).await;

        // then
        assert!(ok);
        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].text,
            "Quote for 10 CELO:\nExpected output: 10 cUSD\nMinimum output (with 1% slippage): 9.9 cUSD"
        );
        assert_eq!(responses[0].content["minToAmount"], "9900000000000000000");
        assert_eq!(responses[0].content["warnings"], json!([]));
    }

    #[tokio::test]
    async fn quote_formats_at_destination_decimals_and_warns_on_fallback() {
        // given
        let cusd = address!("765de816845861e75a25fca122bb6898b8b1282a");
        let mut wallet = MockWalletActions::new();
        wallet
            .expect_read_decimals()
            .withf(move |_, token| *token == cusd)
            .returning(|_, _| Ok(6));
        wallet
            .expect_read_decimals()
            .withf(move |_, token| *token != cusd)
            .returning(|_, _| Err(WalletError::Rpc("timeout".into())));
        let action = MentoAction::new(service(wallet), Arc::new(MockObjectGenerator::new()));
        let request = OperationRequest {
            chain: "celo".into(),
            operation: "quote".into(),
            from_token: "CELO".into(),
            to_token: "cUSD".into(),
            amount: "2".into(),
            slippage: None,
        };

        // when
        let response = action.run_request(&request).await.unwrap();

        // then
        assert!(response.text.contains("Expected output: 2 cUSD"));
        assert!(response.text.contains("(with 0.5% slippage): 1.99 cUSD"));
        assert!(response.text.contains("Warning: decimals of input token"));
        assert_eq!(response.content["toDecimals"], 6);
    }

    #[tokio::test]
    async fn swap_reports_the_transaction_hash() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().returning(|_, _| Ok(18));
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        wallet.expect_send_transaction().times(1).returning(|_, _| Ok(HASH));
        let object = json!({
            "operation": "swap",
            "chain": "celo",
            "fromToken": "CELO",
            "toToken": "cUSD",
            "amount": "2",
            "slippage": "0.5"
        });
        let action = MentoAction::new(service(wallet), Arc::new(generator(object)));

        let (ok, responses) = handle(&action).await;

        assert!(ok);
        assert_eq!(
            responses[0].text,
            format!("Successfully swapped 2 CELO for cUSD\nTransaction Hash: {HASH:#x}")
        );
        assert_eq!(responses[0].content["operation"], "swap");
    }

    #[tokio::test]
    async fn approve_reports_the_transaction_hash() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().returning(|_, _| Ok(18));
        wallet.expect_account_address().returning(|_| Ok(SIGNER));
        wallet.expect_send_transaction().times(1).returning(|_, _| Ok(HASH));
        let object = json!({
            "operation": "approve",
            "chain": "celo",
            "fromToken": "CELO",
            "toToken": "cUSD",
            "amount": 5
        });
        let action = MentoAction::new(service(wallet), Arc::new(generator(object)));

        let (ok, responses) = handle(&action).await;

        assert!(ok);
        assert!(responses[0].text.starts_with("Successfully approved 5 CELO for Mento protocol\n"));
    }

    #[tokio::test]
    async fn unsupported_chain_reports_error_without_wallet_calls() {
        // given
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().never();
        wallet.expect_send_transaction().never();
        let object = json!({
            "operation": "quote",
            "chain": "ethereum",
            "fromToken": "CELO",
            "toToken": "cUSD",
            "amount": "1"
        });
        let action = MentoAction::new(service(wallet), Arc::new(generator(object)));

        // when
        let (ok, responses) = handle(&action).await;

        // then
        assert!(!ok);
        assert_eq!(
            responses[0].text,
            "Error: unsupported chain `ethereum`; use only 'celo' or 'alfajores'"
        );
        assert_eq!(responses[0].content["code"], 2000);
    }

    #[tokio::test]
    async fn generator_failure_is_reported() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().never();
        let mut generator = MockObjectGenerator::new();
        generator
            .expect_generate_object()
            .returning(|_, _| Err(ExternalError::from("model unavailable")));
        let action = MentoAction::new(service(wallet), Arc::new(generator));

        let (ok, responses) = handle(&action).await;

        assert!(!ok);
        assert!(responses[0].text.contains("model unavailable"));
    }

    #[tokio::test]
    async fn missing_callback_still_returns_status() {
        let mut wallet = MockWalletActions::new();
        wallet.expect_read_decimals().never();
        let action = MentoAction::new(service(wallet), Arc::new(generator(json!({"operation": "quote"}))));

        assert!(!action.handle(&State::new(), None).await);
    }
}
