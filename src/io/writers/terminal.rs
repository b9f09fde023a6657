use crate::io::output::OutputWriter;
use crate::report::{AnalysisReport, ProjectStatistics, Selection};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::io::Write;

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
        self.write_header()?;
        self.write_summary(&report.statistics)?;
        self.write_selections(&report.statistics)?;
        self.write_coupling(report)?;
        self.write_artifacts(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "        SOURCE ANALYZER STATISTICS".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, stats: &ProjectStatistics) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "General Information".bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        writeln!(self.writer, "  Classes: {}", stats.class_count)?;
        writeln!(self.writer, "  Methods: {}", stats.method_count)?;
        writeln!(self.writer, "  Lines: {}", stats.total_lines)?;
        writeln!(
            self.writer,
            "  Methods/class: {:.2}  Lines/method: {:.2}  Fields/class: {:.2}",
            stats.average_methods_per_class,
            stats.average_lines_per_method,
            stats.average_fields_per_class
        )?;
        if !stats.packages.is_empty() {
            writeln!(self.writer, "  Packages: {}", stats.packages.join(", "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_selections(&mut self, stats: &ProjectStatistics) -> anyhow::Result<()> {
        self.write_selection("Most methods", &stats.most_methods, |c| {
            format!("{} ({})", c.full_name, c.methods)
        })?;
        self.write_selection("Most fields", &stats.most_fields, |c| {
            format!("{} ({})", c.full_name, c.fields)
        })?;
        self.write_selection(
            "Most methods and fields",
            &stats.most_methods_and_fields,
            |c| format!("{} ({} fields, {} methods)", c.full_name, c.fields, c.methods),
        )?;
        self.write_selection("Longest methods", &stats.longest_methods, |m| {
            format!("{} ({} lines)", m.short_name, m.lines)
        })?;

        writeln!(
            self.writer,
            "{} {}",
            format!("More than {} methods:", stats.min_methods).bold(),
            stats.above_min_methods.len()
        )?;
        for class in &stats.above_min_methods {
            writeln!(self.writer, "  - {} ({})", class.full_name, class.methods)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_selection<T>(
        &mut self,
        title: &str,
        selection: &Selection<T>,
        display: impl Fn(&T) -> String,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {}",
            format!("{} (top {}%):", title, selection.percentage).bold(),
            format!("{}/{}", selection.items.len(), selection.population).dimmed()
        )?;
        for item in &selection.items {
            writeln!(self.writer, "  - {}", display(item))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_coupling(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Class coupling matrix".bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;

        if report.coupling.is_empty() {
            writeln!(self.writer, "  {}", "No classes.".dimmed())?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "{}", coupling_table(report))?;
        writeln!(
            self.writer,
            "  {} relations, {} partitions",
            report.coupling.total(),
            report.partitions
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_artifacts(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        for artifact in &report.artifacts {
            writeln!(
                self.writer,
                "{} {} {}",
                "→".green(),
                artifact.title,
                format!(
                    "({}, {} nodes, {} links)",
                    artifact.file_name, artifact.nodes, artifact.links
                )
                .dimmed()
            )?;
        }
        Ok(())
    }
}

fn coupling_table(report: &AnalysisReport) -> Table {
    let grid = report.coupling.generate_table();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut rows = grid.into_iter();
    if let Some(header) = rows.next() {
        table.set_header(header);
    }
    for row in rows {
        let mut cells = row.into_iter();
        let mut styled = Vec::new();
        if let Some(name) = cells.next() {
            styled.push(Cell::new(name).add_attribute(comfy_table::Attribute::Bold));
        }
        styled.extend(cells.map(Cell::new));
        table.add_row(styled);
    }
    table
}
