use crate::chart::{svg, PieChart};
use crate::complexity::compute_breakdown;
use crate::core::{ComplexityBreakdown, Hyperparameters};
use crate::formatting::FormattingConfig;
use crate::io::{self, OutputFormat};
use crate::observability::{set_hyperparameters, set_phase, RunPhase};
use crate::tui::ChartViewer;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub hyperparameters: Hyperparameters,
    pub format: OutputFormat,
    /// Report destination (defaults to stdout)
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
    /// Show the interactive chart view after the report
    pub interactive_chart: bool,
    /// Export the chart as SVG
    pub chart_output: Option<PathBuf>,
}

impl AnalyzeConfig {
    pub fn new(hyperparameters: Hyperparameters) -> Self {
        Self {
            hyperparameters,
            format: OutputFormat::Terminal,
            output: None,
            formatting: FormattingConfig::default(),
            interactive_chart: true,
            chart_output: None,
        }
    }

    fn wants_chart(&self) -> bool {
        self.interactive_chart || self.chart_output.is_some()
    }
}

/// Print the breakdown for `(L, D, k, h)` to stdout, then show the pie chart.
///
/// Negative values are rejected before anything is printed.
pub fn run(seq_len: i64, hidden_dim: i64, ffn_multiplier: i64, num_heads: i64) -> Result<()> {
    let params = Hyperparameters::from_signed(seq_len, hidden_dim, ffn_multiplier, num_heads)?;
    handle_analyze(AnalyzeConfig::new(params))
}

/// Compute the breakdown, write the report, then render the chart.
///
/// The report is always written before the chart is attempted, so an
/// all-zero breakdown still prints before failing with `EmptyChart`.
pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let params = config.hyperparameters;
    let _params_guard = set_hyperparameters(params);
    let _span = tracing::info_span!("analyze", %params).entered();

    let breakdown = {
        let _phase = set_phase(RunPhase::Calculation);
        compute_breakdown(&params)
            .with_context(|| format!("Failed to compute complexity for {params}"))?
    };

    {
        let _phase = set_phase(RunPhase::Reporting);
        write_report(&breakdown, &config)?;
    }

    if config.wants_chart() {
        let _phase = set_phase(RunPhase::Charting);
        render_chart(&breakdown, &config)?;
    }

    Ok(())
}

fn write_report(breakdown: &ComplexityBreakdown, config: &AnalyzeConfig) -> Result<()> {
    // Color only applies to stdout; report files keep the exact text
    let formatting = if config.output.is_some() {
        FormattingConfig::plain()
    } else {
        config.formatting
    };
    let destination = io::open_destination(config.output.as_deref())?;
    let mut writer = io::create_writer(config.format, destination, formatting);
    writer
        .write_breakdown(breakdown)
        .context("Failed to write complexity report")?;

    if let Some(path) = &config.output {
        tracing::info!("Report written to {}", path.display());
    }
    Ok(())
}

fn render_chart(breakdown: &ComplexityBreakdown, config: &AnalyzeConfig) -> Result<()> {
    let chart = PieChart::from_breakdown(breakdown)?;

    if let Some(path) = &config.chart_output {
        svg::export_svg(&chart, path)?;
    }

    if config.interactive_chart {
        if std::io::stdout().is_terminal() {
            ChartViewer::new()?.show(&chart)?;
        } else {
            tracing::info!("stdout is not a terminal; skipping interactive chart");
        }
    }
    Ok(())
}
