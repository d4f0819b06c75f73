use alloy::primitives::{Address, B256, address};

use crate::chain::CeloChain;
use crate::mento::deployment::{MentoDeployment, MentoDeployments};
use crate::mento::model::{MentoParams, OperationKind};
use crate::mento::slippage::Slippage;

pub const TOKEN_A: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const TOKEN_B: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
pub const SIGNER: Address = address!("5555555555555555555555555555555555555555");
pub const BROKER: Address = address!("777a8255ca72412f0d706dc03c9d1987306b4cad");
pub const EXCHANGE_PROVIDER: Address = address!("3333333333333333333333333333333333333333");

pub fn params(operation: OperationKind, amount: &str) -> MentoParams {
    MentoParams {
        chain: CeloChain::Celo,
        operation,
        from_token: TOKEN_A,
        to_token: TOKEN_B,
        amount: amount.to_string(),
        slippage: Slippage::default(),
    }
}

pub fn deployments() -> MentoDeployments {
    let deployment = MentoDeployment {
        broker: BROKER,
        exchange_provider: EXCHANGE_PROVIDER,
        exchange_id: B256::repeat_byte(0x11),
    };
    MentoDeployments::default()
        .with(CeloChain::Celo, deployment.clone())
        .with(CeloChain::Alfajores, deployment)
}
