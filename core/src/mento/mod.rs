//! Mento Protocol operations: quote, allowance and swap.

pub mod decimals;
pub mod deployment;
pub mod encoder;
pub mod model;
pub mod oracle;
pub mod quote;
pub mod router;
pub mod slippage;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_support;
