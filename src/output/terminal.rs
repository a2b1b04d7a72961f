// Colored terminal output for cluster reports, plus the progress bar.
//
// This module handles all terminal-specific formatting. main.rs delegates
// here so the pipeline itself never prints.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::cluster::ClusterReport;
use crate::pipeline::progress::{Progress, ProgressObserver};

/// indicatif progress bar fed by the pipeline's progress updates.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  Clustering [{bar:30}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&mut self, progress: &Progress) {
        self.bar.set_position(progress.percent as u64);
        self.bar.set_message(progress.message());
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Display the largest clusters of a report.
pub fn display_report(report: &ClusterReport, top_n: usize) {
    if report.is_empty() {
        println!("No keywords to cluster. Is the input file empty?");
        return;
    }

    let totals = report.cluster_totals();
    println!(
        "\n{}",
        format!(
            "=== {} clusters from {} keywords ===",
            totals.len(),
            report.stats.keywords
        )
        .bold()
    );
    println!();

    println!(
        "  {:>4}  {:<48} {:>10}  {:>8}",
        "Rank".dimmed(),
        "Cluster".dimmed(),
        "Volume".dimmed(),
        "Keywords".dimmed(),
    );
    println!("  {}", "-".repeat(76).dimmed());

    for (i, (name, volume, count)) in totals.iter().take(top_n).enumerate() {
        let label = super::truncate_chars(name, 45);
        let label = if *count > 1 {
            label.bold()
        } else {
            label.normal()
        };
        println!("  {:>4}. {:<48} {:>10} {:>8}", i + 1, label, volume, count);
    }

    if totals.len() > top_n {
        println!(
            "  {}",
            format!("... and {} more clusters", totals.len() - top_n).dimmed()
        );
    }

    println!();
    if report.stats.duplicates_removed > 0 {
        println!(
            "  {} {} duplicate keywords removed (identical search results)",
            "~".yellow(),
            report.stats.duplicates_removed
        );
    }
}

/// List input headers and which role each one is mapped to.
pub fn display_columns(headers: &[String], roles: &[(&str, &str)]) {
    println!("\n{}", "=== Input columns ===".bold());
    for header in headers {
        let mapped: Vec<&str> = roles
            .iter()
            .filter(|(_, column)| column.trim() == header.trim())
            .map(|(role, _)| *role)
            .collect();
        if mapped.is_empty() {
            println!("  {}", header.dimmed());
        } else {
            println!("  {:<32} {}", header, mapped.join(", ").green());
        }
    }

    let unmapped: Vec<&str> = roles
        .iter()
        .filter(|(_, column)| !headers.iter().any(|h| h.trim() == column.trim()))
        .map(|(role, _)| *role)
        .collect();
    if !unmapped.is_empty() {
        println!(
            "\n  {} no column found for: {}",
            "!".red().bold(),
            unmapped.join(", ")
        );
    }
}
