// Export modules for library usage
pub mod chart;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod tui;

// Re-export commonly used types
pub use crate::core::{BlockModule, ComplexityBreakdown, Hyperparameters, ModuleCost};

pub use crate::complexity::{add_norm, compute_breakdown, ffn, self_attention};

pub use crate::chart::{PieChart, PieSlice};

pub use crate::commands::analyze::run;

pub use crate::errors::{ErrorCode, FlopmapError};

pub use crate::io::output::{create_writer, report, OutputFormat, OutputWriter};
