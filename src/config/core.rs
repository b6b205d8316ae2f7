use crate::core::Hyperparameters;
use crate::errors::Result;
use crate::formatting::ColorMode;
use crate::io::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for flopmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FlopmapConfig {
    /// Default hyperparameters
    #[serde(default)]
    pub model: Option<ModelConfig>,

    /// Report configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Pie chart configuration
    #[serde(default)]
    pub chart: Option<ChartConfig>,
}

/// Hyperparameter defaults. Signed so a negative value is reported as an
/// invalid argument rather than a parse failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ModelConfig {
    pub seq_len: Option<i64>,
    pub hidden_dim: Option<i64>,
    pub ffn_multiplier: Option<i64>,
    pub num_heads: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    /// Whether to show the interactive chart after the report
    #[serde(default = "default_chart_enabled")]
    pub enabled: bool,

    /// Write the chart as SVG to this path
    #[serde(default)]
    pub svg_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: default_chart_enabled(),
            svg_path: None,
        }
    }
}

fn default_chart_enabled() -> bool {
    true
}

/// Hyperparameters as given on the command line; `None` means not given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HyperparameterOverrides {
    pub seq_len: Option<i64>,
    pub hidden_dim: Option<i64>,
    pub ffn_multiplier: Option<i64>,
    pub num_heads: Option<i64>,
}

impl FlopmapConfig {
    /// Resolve hyperparameters with precedence CLI > config file > built-in
    /// defaults, rejecting negative values.
    pub fn resolve_hyperparameters(&self, cli: &HyperparameterOverrides) -> Result<Hyperparameters> {
        let model = self.model.unwrap_or_default();
        let defaults = Hyperparameters::default();
        let pick = |flag: Option<i64>, file: Option<i64>, fallback: u64| {
            flag.or(file).unwrap_or_else(|| fallback as i64)
        };

        Hyperparameters::from_signed(
            pick(cli.seq_len, model.seq_len, defaults.seq_len),
            pick(cli.hidden_dim, model.hidden_dim, defaults.hidden_dim),
            pick(cli.ffn_multiplier, model.ffn_multiplier, defaults.ffn_multiplier),
            pick(cli.num_heads, model.num_heads, defaults.num_heads),
        )
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.output
            .as_ref()
            .and_then(|o| o.color)
            .unwrap_or_default()
    }

    pub fn chart(&self) -> ChartConfig {
        self.chart.clone().unwrap_or_default()
    }
}
