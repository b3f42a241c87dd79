mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::Analysis;
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// How to pivot the provenance report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupBy {
    /// Each target file, listing the sources that justified it
    #[default]
    Target,
    /// Each source file, listing what it justified
    Source,
}

/// Reporter for outputting analysis results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_references: bool,
    group_by: GroupBy,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
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

    /// Report the analysis outcome
    pub fn report(&self, analysis: &Analysis) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new(self.show_references, self.group_by);
                reporter.report(analysis)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone())
                    .with_references(self.show_references, self.group_by);
                reporter.report(analysis)
            }
        }
    }
}
