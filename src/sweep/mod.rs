//! Destructive removal of unused files
//!
//! Deletion is confirmed once for the whole batch, then proceeds per file: a
//! failed removal is logged and does not abort the remaining removals, and
//! already-deleted files are not rolled back.

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::fs;
use tracing::warn;

/// Outcome of a deletion pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteStats {
    pub deleted: usize,
    pub failed: usize,
}

/// Deletes confirmed unused files
pub struct AssetDeleter {
    dry_run: bool,
    assume_yes: bool,
}

impl AssetDeleter {
    pub fn new(dry_run: bool, assume_yes: bool) -> Self {
        Self {
            dry_run,
            assume_yes,
        }
    }

    /// Delete the given files after confirmation
    pub fn delete(&self, files: &[String]) -> Result<DeleteStats> {
        if files.is_empty() {
            println!("{}", "No unused files to delete.".green());
            return Ok(DeleteStats::default());
        }

        if self.dry_run {
            println!();
            println!("{}", "Dry run - would delete:".yellow().bold());
            for file in files {
                println!("  {} {}", "○".dimmed(), file);
            }
            println!();
            println!(
                "{}",
                format!("Total: {} files would be deleted", files.len()).dimmed()
            );
            return Ok(DeleteStats::default());
        }

        if !self.assume_yes {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Delete {} unused files?", files.len()))
                .default(false)
                .interact()
                .into_diagnostic()?;
            if !confirmed {
                println!("{}", "Deletion cancelled.".yellow());
                return Ok(DeleteStats::default());
            }
        }

        println!();
        println!("{}", "Deleting unused files...".cyan().bold());

        let mut stats = DeleteStats::default();
        for file in files {
            match fs::remove_file(file) {
                Ok(()) => {
                    stats.deleted += 1;
                    println!("  {} {}", "✓".green(), file);
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!("Error deleting {}: {}", file, e);
                    println!("  {} {}: {}", "✗".red(), file, e);
                }
            }
        }

        println!();
        println!(
            "{}",
            format!("Deleted {} files, {} failed", stats.deleted, stats.failed).dimmed()
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run_removes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("orphan.png");
        std::fs::write(&file, b"png").unwrap();

        let deleter = AssetDeleter::new(true, true);
        let stats = deleter
            .delete(&[file.to_string_lossy().to_string()])
            .unwrap();
        assert_eq!(stats, DeleteStats::default());
        assert!(file.exists());
    }

    #[test]
    fn test_failure_does_not_abort_remaining() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("already-gone.png");
        let present = dir.path().join("orphan.png");
        std::fs::write(&present, b"png").unwrap();

        let deleter = AssetDeleter::new(false, true);
        let stats = deleter
            .delete(&[
                missing.to_string_lossy().to_string(),
                present.to_string_lossy().to_string(),
            ])
            .unwrap();

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.deleted, 1);
        assert!(!present.exists());
    }

    #[test]
    fn test_empty_list_is_a_no_op() {
        let deleter = AssetDeleter::new(false, true);
        let stats = deleter.delete(&[]).unwrap();
        assert_eq!(stats, DeleteStats::default());
    }
}
