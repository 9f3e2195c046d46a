use std::{collections::BTreeMap, path::Path};

use colored::Colorize;

use crate::{normalize::Issue, stats::Statistics};

/// number of duplicate keys listed unless verbose output was requested
const DUPLICATE_PREVIEW: usize = 10;

const RULE_WIDTH: usize = 50;

/// prints a statistics table
pub fn print_statistics(stats: &Statistics, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("  {}", title.bold());
    println!("{}", rule);
    println!("  Total lines:      {}", stats.total_lines);
    println!("  Blank lines:      {}", stats.blank_lines);
    println!("  Comments:         {}", stats.comments);
    println!("  Entries:          {}", stats.entries);
    if stats.malformed > 0 {
        println!("  Malformed:        {}", stats.malformed.to_string().red());
    }
    println!("\n  Entries by type:");
    for (rule_type, count) in stats.by_type.iter() {
        println!("    {:<20} {:>5}", rule_type, count);
    }
    println!("{}\n", rule);
}

/// prints the removed duplicates, all of them or only the first few
pub fn print_duplicates(duplicates: &BTreeMap<String, usize>, all: bool) {
    if duplicates.is_empty() {
        println!("No duplicates found.");
        return;
    }
    let total: usize = duplicates.values().sum();
    println!("Removed {} duplicate(s):", total.to_string().yellow());
    let limit = if all { duplicates.len() } else { DUPLICATE_PREVIEW };
    for (key, count) in duplicates.iter().take(limit) {
        println!("  - {}: {} duplicate(s)", key, count);
    }
    if duplicates.len() > limit {
        println!("  ... and {} more", duplicates.len() - limit);
    }
}

/// formats a rejected line as `file:line: reason: text`
pub fn issue_message(path: &Path, issue: &Issue) -> String {
    format!(
        "{}:{}: {}: {}",
        path.display(),
        issue.line,
        issue.reason,
        issue.text
    )
}

/// logs every rejected line with its location
pub fn report_issues(path: &Path, issues: &[Issue]) {
    for issue in issues {
        warn!("{}", issue_message(path, issue));
    }
    if !issues.is_empty() {
        println!(
            "{} {} invalid entr{} in {}",
            "Warning:".yellow().bold(),
            issues.len(),
            if issues.len() == 1 { "y" } else { "ies" },
            path.display()
        );
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}
