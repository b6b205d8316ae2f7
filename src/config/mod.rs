//! Configuration loaded from `.flopmap.toml`.

mod core;
mod loader;

pub use self::core::{ChartConfig, FlopmapConfig, HyperparameterOverrides, ModelConfig, OutputConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path, parse_config,
    CONFIG_FILE_NAME,
};

/// Commented default configuration written by `flopmap init`
pub const DEFAULT_CONFIG: &str = r#"# flopmap configuration

# Hyperparameters used when no flag is given
[model]
seq_len = 512
hidden_dim = 768
ffn_multiplier = 4
num_heads = 12

[output]
# terminal, json, markdown or table
format = "terminal"
# auto, always or never
color = "auto"

[chart]
# show the interactive pie chart after the report
enabled = true
# svg_path = "breakdown.svg"
"#;
