use crate::analysis::Analysis;
use crate::report::GroupBy;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// JSON reporter writing to stdout or a file
pub struct JsonReporter {
    output_path: Option<PathBuf>,
    show_references: bool,
    group_by: GroupBy,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    unused: &'a [String],
    used_count: usize,
    unused_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<BTreeMap<&'a String, Vec<&'a String>>>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            show_references: false,
            group_by: GroupBy::default(),
        }
    }

    pub fn with_references(mut self, show: bool, group_by: GroupBy) -> Self {
        self.show_references = show;
        self.group_by = group_by;
        self
    }

    pub fn report(&self, analysis: &Analysis) -> Result<()> {
        let references = if self.show_references {
            let grouped = match self.group_by {
                GroupBy::Target => analysis.provenance.by_target(),
                GroupBy::Source => analysis.provenance.by_source(),
            };
            Some(
                grouped
                    .iter()
                    .map(|(key, values)| (key, values.iter().collect()))
                    .collect(),
            )
        } else {
            None
        };

        let report = JsonReport {
            unused: &analysis.unused,
            used_count: analysis.used.len(),
            unused_count: analysis.unused.len(),
            references,
        };

        match &self.output_path {
            Some(path) => {
                let file = std::fs::File::create(path).into_diagnostic()?;
                serde_json::to_writer_pretty(file, &report).into_diagnostic()?;
            }
            None => {
                let stdout = std::io::stdout();
                serde_json::to_writer_pretty(stdout.lock(), &report).into_diagnostic()?;
                println!();
            }
        }

        Ok(())
    }
}
