pub mod chain;
pub mod error;
pub mod mento;
pub mod tokens;
pub mod transfer;
pub mod utils;
pub mod wallet;
