use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use flopmap::cli::{hyperparameter_overrides, Cli, Commands};
use flopmap::commands::analyze::{handle_analyze, AnalyzeConfig};
use flopmap::config::{load_config, FlopmapConfig};
use flopmap::errors::describe_failure;
use flopmap::formatting::{ColorMode, FormattingConfig};
use flopmap::observability::{init_logging, install_panic_hook, set_phase, RunPhase};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());
    install_panic_hook();

    let result = match cli.command {
        command @ Commands::Analyze { .. } => handle_analyze_command(command),
        Commands::Init { force } => flopmap::commands::init::init_config(force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    let (message, status) = describe_failure(err);
    let formatting = if std::io::stderr().is_terminal() {
        FormattingConfig::from_env(ColorMode::Auto)
    } else {
        FormattingConfig::plain()
    };
    eprintln!("{} {message}", formatting.formatter().error("Error:"));
    ExitCode::from(status)
}

fn handle_analyze_command(command: Commands) -> Result<()> {
    let Commands::Analyze {
        seq_len,
        hidden_dim,
        ffn_multiplier,
        num_heads,
        format,
        output,
        chart_output,
        no_chart,
        plain,
        config,
        verbosity: _,
    } = command
    else {
        anyhow::bail!("Invalid command");
    };

    let analyze_config = {
        let _phase = set_phase(RunPhase::Configuration);
        let file_config = load_config(config.as_deref())?;
        let overrides = hyperparameter_overrides(seq_len, hidden_dim, ffn_multiplier, num_heads);
        build_analyze_config(&file_config, overrides, format, output, chart_output, no_chart, plain)?
    };

    handle_analyze(analyze_config)
}

// Pure function merging CLI flags over the configuration file
fn build_analyze_config(
    file_config: &FlopmapConfig,
    overrides: flopmap::config::HyperparameterOverrides,
    format: Option<flopmap::io::OutputFormat>,
    output: Option<std::path::PathBuf>,
    chart_output: Option<std::path::PathBuf>,
    no_chart: bool,
    plain: bool,
) -> Result<AnalyzeConfig> {
    let hyperparameters = file_config.resolve_hyperparameters(&overrides)?;
    let chart = file_config.chart();

    Ok(AnalyzeConfig {
        hyperparameters,
        format: format.unwrap_or_else(|| file_config.output_format()),
        output,
        formatting: create_formatting_config(plain, file_config.color_mode()),
        interactive_chart: chart.enabled && !no_chart,
        chart_output: chart_output.or(chart.svg_path),
    })
}

fn create_formatting_config(plain: bool, color: ColorMode) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env(color)
    }
}
