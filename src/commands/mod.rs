//! CLI command implementations.
//!
//! Available commands:
//! - **analyze**: compute, report and chart the complexity breakdown
//! - **init**: write a default `.flopmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, run, AnalyzeConfig};
pub use init::init_config;
