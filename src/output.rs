//! Terminal output: colored status lines, the pass-1 progress bar and the
//! end-of-run summary table.

use crate::file_category::Destination;
use crate::organizer::OrganizeReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar over `total` directory entries.
    ///
    /// Hidden when `quiet` is set. indicatif draws to stderr and stays
    /// silent when stderr is not a terminal.
    pub fn create_progress_bar(total: u64, quiet: bool) -> ProgressBar {
        if quiet {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Prints moved entries per destination, plus totals.
    pub fn summary_table(report: &OrganizeReport) {
        let counts = report.count_by_destination();
        Self::header("SUMMARY");
        Self::print_counts(&counts);

        let skipped = report.skipped.len();
        if skipped > 0 {
            println!("{} left in place", plural(skipped, "entry", "entries"));
        }
    }

    fn print_counts(counts: &BTreeMap<Destination, usize>) {
        let rows: Vec<(String, usize)> = counts.iter().map(|(d, n)| (d.to_string(), *n)).collect();
        let total: usize = rows.iter().map(|(_, n)| n).sum();

        let width = rows
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Destination".len());

        println!(
            "{:<width$} | {}",
            "Destination".bold(),
            "Moved".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (name, count) in &rows {
            println!(
                "{:<width$} | {}",
                name,
                plural(*count, "entry", "entries").green(),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {}",
            "Total".bold(),
            plural(total, "entry", "entries").green().bold(),
            width = width
        );
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "entry", "entries"), "1 entry");
        assert_eq!(plural(0, "entry", "entries"), "0 entries");
        assert_eq!(plural(7, "entry", "entries"), "7 entries");
    }

    #[test]
    fn test_quiet_progress_bar_is_hidden() {
        assert!(OutputFormatter::create_progress_bar(10, true).is_hidden());
    }
}
