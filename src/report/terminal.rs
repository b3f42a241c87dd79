use crate::analysis::Analysis;
use crate::report::GroupBy;
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    show_references: bool,
    group_by: GroupBy,
}

impl TerminalReporter {
    pub fn new(show_references: bool, group_by: GroupBy) -> Self {
        Self {
            show_references,
            group_by,
        }
    }

    pub fn report(&self, analysis: &Analysis) -> Result<()> {
        if self.show_references {
            self.print_references(analysis);
        }

        if analysis.unused.is_empty() {
            println!("{}", "No unused files found!".green().bold());
        } else {
            println!();
            println!(
                "{}",
                format!("Found {} unused files:", analysis.unused.len())
                    .yellow()
                    .bold()
            );
            println!();
            for path in &analysis.unused {
                println!("  {} {}", "○".dimmed(), path);
            }
        }

        println!();
        println!(
            "{}",
            format!(
                "Summary: {} used, {} unused",
                analysis.used.len(),
                analysis.unused.len()
            )
            .dimmed()
        );

        Ok(())
    }

    fn print_references(&self, analysis: &Analysis) {
        println!();
        println!("{}", "Used file references:".cyan().bold());
        println!();

        match self.group_by {
            GroupBy::Target => {
                for (target, sources) in analysis.provenance.by_target() {
                    println!("{}", format!("File: {} used in:", target).cyan());
                    for source in sources {
                        println!("  - {}", source);
                    }
                }
            }
            GroupBy::Source => {
                for (source, targets) in analysis.provenance.by_source() {
                    println!("{}", format!("Files used in: {}", source).cyan());
                    for target in targets {
                        println!("  - {}", target);
                    }
                }
            }
        }
    }
}
