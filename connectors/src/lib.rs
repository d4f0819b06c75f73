pub mod backend;
pub mod error;
pub mod token_registry_loader;
