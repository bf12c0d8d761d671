//! Langscan Core - Shared data structures and infrastructure
//!
//! Defines the report data model, error taxonomy, configuration, logging, and
//! async helpers used by the scanning pipeline and the CLI.

pub mod async_utils;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use async_utils::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
