pub mod actions;
pub mod config;
pub mod context;
pub mod error;
pub mod plugin;
pub mod runtime;
pub mod templates;
pub mod wallet_provider;
