use std::process::ExitCode;
use std::sync::Arc;

use celo_plugin::actions::mento::MENTO_ACTION;
use celo_plugin::actions::transfer::TRANSFER_ACTION;
use celo_plugin::config::Config;
use celo_plugin::error::{PluginError, PluginResult};
use celo_plugin::plugin::{CeloPlugin, PluginServices};
use celo_plugin::runtime::{ActionResponse, EnvRuntime, State, StaticObjectGenerator};
use celo_plugin_commons::env::load_env;
use celo_plugin_commons::error::format_with_code;
use celo_plugin_commons::telemetry::init_telemetry_from_env;
use celo_plugin_core::chain::CeloChain;
use celo_plugin_core::mento::model::OperationRequest;
use celo_plugin_core::transfer::model::TransferRequest;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "celo-plugin")]
#[command(about = "Run Mento quotes, approvals, swaps and transfers on Celo from the command line.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MentoArgs {
    // "celo" or "alfajores"
    #[arg(long, default_value = "alfajores")]
    chain: String,
    // Token sold: symbol (CELO, cUSD, ...) or 0x address
    #[arg(long)]
    from: String,
    // Token bought
    #[arg(long)]
    to: String,
    #[arg(long)]
    amount: String,
    // Percent, defaults to 0.5
    #[arg(long)]
    slippage: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    // Prices a swap without sending anything
    Quote(MentoArgs),
    // Lets the Mento broker spend `amount` of the input token
    Approve(MentoArgs),
    // Swaps through the Mento broker
    Swap(MentoArgs),
    // Sends native CELO, or an ERC20 when --token is given
    Transfer {
        #[arg(long, default_value = "alfajores")]
        chain: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        token: Option<String>,
    },
    // Lists the known token symbols for a chain
    Tokens {
        #[arg(long, default_value = "alfajores")]
        chain: String,
    },
}

impl MentoArgs {
    fn into_request(self, operation: &str) -> OperationRequest {
        OperationRequest {
            chain: self.chain,
            operation: operation.to_string(),
            from_token: self.from,
            to_token: self.to,
            amount: self.amount,
            slippage: self.slippage,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_env();
    let cli = Cli::parse();

    let _telemetry_guard = match init_telemetry_from_env() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Failed to initialize telemetry: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command).await {
        Ok(response) => {
            println!("{}", response.text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", format_with_code(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> PluginResult<ActionResponse> {
    let config = Config::load()?;
    let services = PluginServices::connect(&config)?;

    match command {
        Commands::Quote(args) => dispatch(&services, MENTO_ACTION.name, &args.into_request("quote")).await,
        Commands::Approve(args) => dispatch(&services, MENTO_ACTION.name, &args.into_request("approve")).await,
        Commands::Swap(args) => dispatch(&services, MENTO_ACTION.name, &args.into_request("swap")).await,
        Commands::Transfer {
            chain,
            to,
            amount,
            token,
        } => {
            let request = TransferRequest {
                from_chain: chain,
                amount,
                to_address: to,
                token,
            };
            dispatch(&services, TRANSFER_ACTION.name, &request).await
        }
        Commands::Tokens { chain } => {
            let chain: CeloChain = chain.parse()?;
            let lines: Vec<String> = services
                .mento
                .registry()
                .all(chain)
                .iter()
                .map(|token| format!("{:<8} {:#x}", token.symbol, token.address))
                .collect();
            Ok(ActionResponse {
                text: lines.join("\n"),
                content: Value::Null,
            })
        }
    }
}

// Runs the named action through the plugin, with settings from the
// environment and a generator that echoes the structured request.
async fn dispatch<T: Serialize>(services: &PluginServices, action: &str, request: &T) -> PluginResult<ActionResponse> {
    let object = serde_json::to_value(request).map_err(|e| PluginError::MalformedObject { reason: e.to_string() })?;
    let plugin = CeloPlugin::new(services, Arc::new(StaticObjectGenerator::new(object)));
    plugin.run(action, &EnvRuntime, &State::new()).await
}
