//! Report writers
//!
//! Terminal output for humans, JSON for tooling. Writers only render; all
//! ordering decisions happen in the engine.

use crate::core::AnalysisReport;
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout())),
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
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        for file in &report.files {
            for violation in &file.violations {
                let position = format!(
                    "{}:{}:{}",
                    file.path.display(),
                    violation.location.line,
                    violation.location.column
                );
                let fix_note = if violation.fix.is_some() {
                    " (fix available)".dimmed().to_string()
                } else {
                    String::new()
                };
                writeln!(
                    self.writer,
                    "{} {} {}{}",
                    position.cyan(),
                    violation.kind.as_str().yellow(),
                    violation.message,
                    fix_note
                )?;
            }
        }

        let total = report.total_violations();
        let summary = format!(
            "{} violation(s) in {} file(s), {} fixable",
            total,
            report.files.len(),
            report.fixable_violations()
        );
        if total == 0 {
            writeln!(self.writer, "{}", "No violations found".green())?;
        } else {
            writeln!(self.writer, "{}", summary.red().bold())?;
        }
        Ok(())
    }
}
