//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod generate;
pub mod models;

// Re-export main command functions
pub use generate::{execute_generate, validate_args};
pub use models::GenerateArgs;
