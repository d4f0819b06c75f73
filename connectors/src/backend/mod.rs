pub mod broker_oracle;
pub mod celo_backend;
pub mod providers;
