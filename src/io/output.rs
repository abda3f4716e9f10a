//! Report writers: JSON (the machine-readable export document), Markdown
//! and Terminal renderings of the same recomputed report.

use crate::report::AssessmentReport;
use colored::*;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()>;
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
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&report.export)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
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
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_functions(report)?;
        self.write_priorities(report)?;
        self.write_unassessed(report)?;
        self.write_action(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Control Maturity Assessment Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.export.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Basis: {}", report.export.basis)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let s = &report.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Overall maturity | {} / 100 |", s.overall)?;
        writeln!(self.writer, "| Assessment | {} |", s.level.label())?;
        writeln!(
            self.writer,
            "| Coverage | {}% ({} of {} scored) |",
            s.coverage_pct, s.scored, s.total
        )?;
        writeln!(
            self.writer,
            "| Weakest function | {} ({}) at {} |",
            s.weakest.label, s.weakest.tag, s.weakest.average_maturity
        )?;
        writeln!(
            self.writer,
            "| Unassessed categories | {} |",
            s.unassessed_count
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "### Answer distribution")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Answer | Count | Share |")?;
        writeln!(self.writer, "|--------|-------|-------|")?;
        for (label, count) in s.counts.rows() {
            writeln!(
                self.writer,
                "| {} | {} | {}% |",
                label,
                count,
                s.pct_of_total(count)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_functions(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Maturity by function")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Function | Average | Coverage | Answered |")?;
        writeln!(self.writer, "|----------|---------|----------|----------|")?;
        for stat in &report.function_stats {
            writeln!(
                self.writer,
                "| {} ({}) | {} | {}% | {}/{} |",
                stat.label, stat.tag, stat.average_maturity, stat.coverage_pct, stat.answered,
                stat.total
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_priorities(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Top remediation priorities")?;
        writeln!(self.writer)?;
        if report.export.top_priorities.is_empty() {
            writeln!(self.writer, "Nothing has been scored yet.")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        for (rank, cat) in report.export.top_priorities.iter().enumerate() {
            writeln!(self.writer, "### #{} {}", rank + 1, cat.category_label)?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "{} ({}) | average {} | coverage {}%",
                cat.function_label,
                cat.function_tag,
                cat.avg_maturity
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "—".into()),
                cat.coverage_pct
            )?;
            writeln!(self.writer)?;
            if !cat.lowest_items.is_empty() {
                writeln!(self.writer, "Lowest-scoring items:")?;
                writeln!(self.writer)?;
                for item in &cat.lowest_items {
                    writeln!(self.writer, "- `{}` answered {}", item.id, item.answer.label())?;
                }
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn write_unassessed(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        if report.export.unassessed_categories.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Unassessed categories")?;
        writeln!(self.writer)?;
        for cat in &report.export.unassessed_categories {
            writeln!(
                self.writer,
                "- {} ({})",
                cat.category_label, cat.function_tag
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_action(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommended action")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", report.summary.action.message())?;
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
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let s = &report.summary;

        writeln!(self.writer, "{}", "Control Maturity Assessment".bold().blue())?;
        writeln!(self.writer, "{}", "===========================".blue())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Overall maturity: {} / 100 ({})",
            s.overall.to_string().bold(),
            s.level.label()
        )?;
        writeln!(
            self.writer,
            "Coverage: {}% ({} of {} scored, {} unassessed)",
            s.coverage_pct, s.scored, s.total, s.unanswered
        )?;
        writeln!(
            self.writer,
            "Weakest function: {} ({}) at {}",
            s.weakest.label.bold(),
            s.weakest.tag,
            s.weakest.average_maturity
        )?;
        writeln!(self.writer)?;

        let mut distribution = Table::new();
        distribution.load_preset(UTF8_FULL_CONDENSED);
        distribution.set_header(vec!["Answer", "Count", "Share"]);
        for (label, count) in s.counts.rows() {
            distribution.add_row(vec![
                Cell::new(label),
                Cell::new(count),
                Cell::new(format!("{}%", s.pct_of_total(count))),
            ]);
        }
        writeln!(self.writer, "{distribution}")?;
        writeln!(self.writer)?;

        let mut functions = Table::new();
        functions.load_preset(UTF8_FULL_CONDENSED);
        functions.set_header(vec!["Function", "Average", "Coverage", "Answered"]);
        for stat in &report.function_stats {
            functions.add_row(vec![
                Cell::new(format!("{} ({})", stat.label, stat.tag)),
                Cell::new(stat.average_maturity),
                Cell::new(format!("{}%", stat.coverage_pct)),
                Cell::new(format!("{}/{}", stat.answered, stat.total)),
            ]);
        }
        writeln!(self.writer, "{functions}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", "Top remediation priorities".bold())?;
        if report.export.top_priorities.is_empty() {
            writeln!(self.writer, "  (nothing scored yet)")?;
        }
        for (rank, cat) in report.export.top_priorities.iter().enumerate() {
            writeln!(
                self.writer,
                "  #{} {} — average {}, coverage {}%",
                rank + 1,
                cat.category_label.bold(),
                cat.avg_maturity
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "—".into()),
                cat.coverage_pct
            )?;
            for item in &cat.lowest_items {
                writeln!(self.writer, "      {} ({})", item.id, item.answer.label())?;
            }
        }
        writeln!(self.writer)?;

        if s.unassessed_count > 0 {
            writeln!(
                self.writer,
                "{} {} categories have no scored answers yet",
                "Unassessed:".bold(),
                s.unassessed_count
            )?;
            writeln!(self.writer)?;
        }

        writeln!(self.writer, "{} {}", "Next:".bold().green(), s.action.message())?;
        Ok(())
    }
}

/// Stdout writer for the given format.
pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout())),
    }
}

/// Writer over an arbitrary sink (e.g. an output file).
pub fn create_writer_to<W: Write + 'static>(format: OutputFormat, sink: W) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    }
}
