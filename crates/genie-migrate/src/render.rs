//! Console rendering of substitution reports and migration outcomes.

use genie_core::{MigrationOutcome, PhaseStatus, SubstitutionReport};

pub fn print_report(report: &SubstitutionReport) {
    if report.is_empty() {
        println!("No transformations applied");
        return;
    }

    println!("Applied {} transformation rule(s):", report.len());
    for outcome in report.outcomes() {
        if outcome.count > 0 {
            println!(
                "  - replaced '{}' with '{}' ({} occurrence(s))",
                outcome.search, outcome.replace, outcome.count
            );
        } else {
            println!(
                "  - warning: '{}' not found in serialized space",
                outcome.search
            );
        }
    }
}

pub fn print_outcome(outcome: &MigrationOutcome) {
    println!("Phases:");
    for (name, status) in [
        ("fetch", outcome.fetch),
        ("transform", outcome.transform),
        ("publish", outcome.publish),
    ] {
        println!("  {:9} {}", name, status_label(status));
    }

    if let Some(report) = &outcome.report {
        print_report(report);
    }

    if let Some(space_id) = &outcome.space_id {
        println!("Migration complete: destination space {}", space_id);
    }
}

fn status_label(status: PhaseStatus) -> &'static str {
    match status {
        PhaseStatus::NotRun => "not run",
        PhaseStatus::Succeeded => "ok",
        PhaseStatus::Failed => "failed",
    }
}
