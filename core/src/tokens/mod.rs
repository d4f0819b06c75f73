pub mod celo_token;
pub mod erc20;
pub mod token_amount;
pub mod token_registry;
