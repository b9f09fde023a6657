use crate::io::output::OutputWriter;
use crate::report::{AnalysisReport, ClassSummary, MethodSummary, ProjectStatistics, Selection};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &AnalysisReport) -> anyhow::Result<()>> = vec![
            |w, r| w.write_general_information(&r.statistics),
            |w, r| w.write_selections(&r.statistics),
            |w, r| w.write_class_list(&r.statistics),
            |w, r| w.write_coupling_matrix(r),
            |w, r| w.write_artifacts(r),
        ];

        writeln!(self.writer, "# Source Analyzer Statistics")?;
        writeln!(self.writer)?;
        writers.iter().try_for_each(|writer| writer(self, report))
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_general_information(&mut self, stats: &ProjectStatistics) -> anyhow::Result<()> {
        writeln!(self.writer, "## General Information")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- Number of classes : {}", stats.class_count)?;
        writeln!(self.writer, "- Total number of lines : {}", stats.total_lines)?;
        writeln!(
            self.writer,
            "- Average number of methods/class : {:.2}",
            stats.average_methods_per_class
        )?;
        writeln!(
            self.writer,
            "- Average number of lines/method : {:.2}",
            stats.average_lines_per_method
        )?;
        writeln!(
            self.writer,
            "- Average number of fields/class : {:.2}",
            stats.average_fields_per_class
        )?;
        writeln!(self.writer)?;

        self.write_list("Package(s)", &stats.packages, |p| p.clone())
    }

    fn write_selections(&mut self, stats: &ProjectStatistics) -> anyhow::Result<()> {
        self.write_with_most("Class(es)", "Method(s)", &stats.most_methods, |c| {
            format!("{} : {} method(s)", c.full_name, c.methods)
        })?;
        self.write_with_most("Class(es)", "Field(s)", &stats.most_fields, |c| {
            format!("{} : {} field(s)", c.full_name, c.fields)
        })?;
        self.write_with_most(
            "Class(es)",
            "Field(s) and Method(s)",
            &stats.most_methods_and_fields,
            |c: &ClassSummary| {
                format!(
                    "{} : {} field(s), {} method(s)",
                    c.full_name, c.fields, c.methods
                )
            },
        )?;
        self.write_list(
            &format!("Class(es) with More than {} Method(s)", stats.min_methods),
            &stats.above_min_methods,
            |c| format!("{} : {} method(s)", c.full_name, c.methods),
        )?;
        self.write_with_most(
            "Method(s)",
            "Line(s)",
            &stats.longest_methods,
            |m: &MethodSummary| format!("{} : {} line(s)", m.short_name, m.lines),
        )?;
        self.write_list(
            "Method(s) With The Highest Number of Parameter(s)",
            &stats.most_parameters,
            |m| format!("{} : {} parameters", m.full_name, m.parameters),
        )
    }

    fn write_class_list(&mut self, stats: &ProjectStatistics) -> anyhow::Result<()> {
        writeln!(self.writer, "# Class List")?;
        writeln!(self.writer)?;
        for class in &stats.class_list {
            writeln!(self.writer, "- {}", class.full_name)?;
            for signature in &class.signatures {
                writeln!(self.writer, "  - {}", signature)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_coupling_matrix(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Class coupling matrix")?;
        writeln!(self.writer)?;

        let table = report.coupling.generate_table();
        if let Some((header, rows)) = table.split_first() {
            self.write_row(header)?;
            self.write_row(&vec!["---".to_string(); header.len()])?;
            for row in rows {
                self.write_row(row)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, cells: &[String]) -> anyhow::Result<()> {
        writeln!(self.writer, "| {} |", cells.join(" | "))?;
        Ok(())
    }

    fn write_artifacts(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        for artifact in &report.artifacts {
            writeln!(self.writer, "## {}", artifact.title)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "> written in `{}`", artifact.file_name)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_with_most<T>(
        &mut self,
        kind: &str,
        criterion: &str,
        selection: &Selection<T>,
        display: impl Fn(&T) -> String,
    ) -> anyhow::Result<()> {
        let title = format!(
            "{}% ({}/{}) of {} With Most {}",
            selection.percentage,
            selection.items.len(),
            selection.population,
            kind,
            criterion
        );
        self.write_list(&title, &selection.items, display)
    }

    fn write_list<T>(
        &mut self,
        title: &str,
        items: &[T],
        display: impl Fn(&T) -> String,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", title)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "> Number of {} : {}",
            title.to_lowercase(),
            items.len()
        )?;
        writeln!(self.writer)?;
        for item in items {
            writeln!(self.writer, "- {}", display(item))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::coupling::{class_coupling, CouplingMatrix};
    use crate::facts::{FactIndex, FactSet};
    use crate::report::ArtifactRecord;
    use indoc::indoc;

    fn report() -> AnalysisReport {
        let facts = FactSet::from_json(indoc! {r#"
            {"types": [
              {"name": "A", "package": "p", "lines": 20, "fields": 2, "methods": [
                {"name": "run", "parameters": ["int"], "lines": 8, "invocations": [
                  {"name": "help", "declaring_type": "B", "package": "p"}
                ]}
              ]},
              {"name": "B", "package": "p", "lines": 5, "methods": [
                {"name": "help", "lines": 3}
              ]}
            ]}
        "#})
        .unwrap();
        let index = FactIndex::new(facts);

        AnalysisReport {
            statistics: ProjectStatistics::compute(&index, &ReportConfig::default()),
            coupling: class_coupling(&index),
            partitions: 1,
            artifacts: vec![ArtifactRecord {
                title: "MethodCall Json graph".into(),
                file_name: "method-call-output.json".into(),
                nodes: 2,
                links: 1,
            }],
        }
    }

    fn render(report: &AnalysisReport) -> String {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer).write_report(report).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_sections_are_written() {
        let output = render(&report());

        assert!(output.starts_with("# Source Analyzer Statistics\n"));
        assert!(output.contains("- Number of classes : 2\n"));
        assert!(output.contains("- Average number of methods/class : 1.00\n"));
        assert!(output.contains("## Package(s)\n\n> Number of package(s) : 1\n\n- p\n"));
        assert!(output.contains("## 10% (1/2) of Class(es) With Most Method(s)\n"));
        assert!(output.contains("- p.A\n  - run(int)\n- p.B\n  - help()\n"));
        assert!(output.contains("## MethodCall Json graph\n\n> written in `method-call-output.json`\n"));
    }

    #[test]
    fn test_coupling_table_is_markdown() {
        let output = render(&report());

        assert!(output.contains("|  | p.A | p.B |\n| --- | --- | --- |\n"));
        assert!(output.contains("| p.A | - | 1 (1/1) |\n"));
    }

    #[test]
    fn test_empty_matrix_renders_header_only() {
        let mut report = report();
        report.coupling = CouplingMatrix::new(Vec::<String>::new());
        let output = render(&report);

        assert!(output.contains("## Class coupling matrix\n\n|  |\n| --- |\n\n"));
    }
}
