pub mod diagnostics;
pub mod env;
pub mod error;
pub mod telemetry;
