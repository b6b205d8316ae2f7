use crate::core::{BlockModule, ComplexityBreakdown, Hyperparameters};
use crate::formatting::{FormattingConfig, OutputFormatter, PlainFormatter};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, CellAlignment, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Header line of the plain-text report
pub const REPORT_HEADER: &str = "Complexity Breakdown:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
    Table,
}

pub trait OutputWriter {
    fn write_breakdown(&mut self, breakdown: &ComplexityBreakdown) -> anyhow::Result<()>;
}

/// The console report: header, one `- <name>: <value>` line per module,
/// a blank line, then the total.
pub fn report(breakdown: &ComplexityBreakdown) -> String {
    render_report(breakdown, &PlainFormatter)
}

fn render_report(breakdown: &ComplexityBreakdown, formatter: &dyn OutputFormatter) -> String {
    let mut out = String::new();
    out.push_str(&formatter.bold(REPORT_HEADER));
    out.push('\n');
    for entry in breakdown.iter() {
        out.push_str(&format!("- {}: {}\n", entry.module, entry.cost));
    }
    out.push('\n');
    out.push_str(&format!("Total Complexity: {}\n", breakdown.total()));
    out
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatting: FormattingConfig,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self { writer, formatting }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_breakdown(&mut self, breakdown: &ComplexityBreakdown) -> anyhow::Result<()> {
        let formatter = self.formatting.formatter();
        self.writer
            .write_all(render_report(breakdown, formatter.as_ref()).as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonModule {
    module: BlockModule,
    cost: u64,
    share: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    hyperparameters: Hyperparameters,
    modules: Vec<JsonModule>,
    total: u64,
}

impl From<&ComplexityBreakdown> for JsonReport {
    fn from(breakdown: &ComplexityBreakdown) -> Self {
        Self {
            hyperparameters: breakdown.hyperparameters(),
            modules: breakdown
                .iter()
                .map(|m| JsonModule {
                    module: m.module,
                    cost: m.cost,
                    share: breakdown.share(m.module),
                })
                .collect(),
            total: breakdown.total(),
        }
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_breakdown(&mut self, breakdown: &ComplexityBreakdown) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&JsonReport::from(breakdown))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_breakdown(&mut self, breakdown: &ComplexityBreakdown) -> anyhow::Result<()> {
        writeln!(self.writer, "# Model Complexity Breakdown")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Hyperparameters: {}",
            breakdown.hyperparameters()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Module | Complexity | Share |")?;
        writeln!(self.writer, "|--------|-----------:|------:|")?;
        for entry in breakdown.iter() {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                entry.module,
                entry.cost,
                format_share(breakdown, entry.module)
            )?;
        }
        writeln!(
            self.writer,
            "| **Total** | **{}** | {} |",
            breakdown.total(),
            total_share(breakdown)
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TableWriter<W> {
    fn write_breakdown(&mut self, breakdown: &ComplexityBreakdown) -> anyhow::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Module", "Complexity", "Share"]);

        for entry in breakdown.iter() {
            table.add_row(vec![
                entry.module.to_string(),
                entry.cost.to_string(),
                format_share(breakdown, entry.module),
            ]);
        }
        table.add_row(vec![
            "Total".to_string(),
            breakdown.total().to_string(),
            total_share(breakdown),
        ]);

        for index in [1, 2] {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }
}

// Half-up rounding, matching the chart annotations
fn format_share(breakdown: &ComplexityBreakdown, module: BlockModule) -> String {
    let share = (breakdown.share(module) * 10.0).round() / 10.0;
    format!("{share:.1}%")
}

fn total_share(breakdown: &ComplexityBreakdown) -> String {
    if breakdown.is_empty() {
        "0.0%".to_string()
    } else {
        "100.0%".to_string()
    }
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Table => Box::new(TableWriter::new(writer)),
    }
}
