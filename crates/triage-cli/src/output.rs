//! Terminal output formatting.

use colored::Colorize;

use triage_core::HistoryRow;
use triage_ml::SimilarIncident;

/// Print ranked similar incidents.
pub fn print_similar(query: &str, results: &[SimilarIncident]) {
    println!("{} {}", "Similar to".bold(), query.cyan());
    println!();

    if results.is_empty() {
        println!("{}", "No similar incidents found.".dimmed());
        return;
    }

    for (i, incident) in results.iter().enumerate() {
        println!("  {}. {}", i + 1, incident.log_text);
        println!("     {}: {}", "Root cause".bold(), incident.root_cause.yellow());
    }
}

/// Print the incident history as a table.
pub fn print_history(rows: &[HistoryRow]) {
    if rows.is_empty() {
        println!("{}", "No incident history yet.".dimmed());
        return;
    }

    println!(
        "{:<26} {:<16} {:<10} {:<40} {:<14}",
        "Timestamp", "Component", "Severity", "Log", "Root Cause"
    );
    println!("{}", "-".repeat(108));

    for row in rows {
        println!(
            "{:<26} {:<16} {:<10} {:<40} {:<14}",
            truncate(&row.timestamp, 24),
            truncate(&row.component, 14),
            truncate(&row.severity, 8),
            truncate(&row.log_text, 38),
            row.predicted_root_cause.yellow()
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
