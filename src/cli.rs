use crate::config::HyperparameterOverrides;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flopmap")]
#[command(about = "Operation-count breakdown for a transformer encoder block", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute, report and chart the complexity of one encoder block
    Analyze {
        /// Sequence length L [default: 512]
        #[arg(short = 'L', long = "seq-len", allow_negative_numbers = true)]
        seq_len: Option<i64>,

        /// Hidden dimension D [default: 768]
        #[arg(short = 'D', long = "hidden-dim", allow_negative_numbers = true)]
        hidden_dim: Option<i64>,

        /// FFN intermediate multiplier k [default: 4]
        #[arg(short = 'k', long = "ffn-multiplier", allow_negative_numbers = true)]
        ffn_multiplier: Option<i64>,

        /// Number of attention heads h [default: 12]
        #[arg(short = 'H', long = "heads", allow_negative_numbers = true)]
        num_heads: Option<i64>,

        /// Output format [default: terminal]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the pie chart as an SVG image
        #[arg(long = "chart-output", visible_alias = "svg")]
        chart_output: Option<PathBuf>,

        /// Skip the interactive pie chart
        #[arg(long = "no-chart")]
        no_chart: bool,

        /// Plain output (no colors)
        #[arg(long)]
        plain: bool,

        /// Configuration file (defaults to the nearest .flopmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Analyze { verbosity, .. } => *verbosity,
            Self::Init { .. } => 0,
        }
    }
}

/// Hyperparameter flags as overrides for the configuration file
pub fn hyperparameter_overrides(
    seq_len: Option<i64>,
    hidden_dim: Option<i64>,
    ffn_multiplier: Option<i64>,
    num_heads: Option<i64>,
) -> HyperparameterOverrides {
    HyperparameterOverrides {
        seq_len,
        hidden_dim,
        ffn_multiplier,
        num_heads,
    }
}
