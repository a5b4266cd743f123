//! `redfish-validate run`

use anyhow::{Context, Result};
use colored::Colorize;

use crate::checks::{Check, CheckOutcome, CheckResult};
use crate::config::SuiteConfig;
use crate::suite::{run_suite, SuiteReport};

/// Run the selected checks and print the report.
///
/// Returns whether every check passed or was skipped.
pub fn execute(config: &SuiteConfig, checks: &[Check], json: bool) -> Result<bool> {
    config.validate().context("Invalid configuration")?;

    if checks.is_empty() {
        anyhow::bail!("No checks selected");
    }

    if !json {
        println!("{}", crate::BANNER.bold());
        println!(
            "{} Validating {} ({} check(s))\n",
            "→".cyan().bold(),
            config.redfish.base_url,
            checks.len()
        );
    }

    let report = run_suite(config, checks)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{rendered}");
    } else {
        print_report(&report);
    }

    Ok(report.all_passed())
}

fn print_result(result: &CheckResult) {
    let (icon, label) = match result.outcome {
        CheckOutcome::Passed { .. } => ("✓".green().bold(), result.outcome.label().green()),
        CheckOutcome::Skipped { .. } => ("○".yellow().bold(), result.outcome.label().yellow()),
        CheckOutcome::Failed { .. } => ("✗".red().bold(), result.outcome.label().red()),
    };
    println!(
        "  {} {:<14} {} {}",
        icon,
        result.check.name(),
        label,
        format!("({}ms)", result.duration.as_millis()).dimmed()
    );
    println!("      {}", result.outcome.message());
}

fn print_report(report: &SuiteReport) {
    for result in &report.results {
        print_result(result);
    }

    println!();
    if !report.logged_out {
        println!(
            "{} Session was not deleted cleanly (see log)",
            "!".yellow().bold()
        );
    }

    if report.all_passed() {
        println!("{} {}", "✓".green().bold(), report.summary());
    } else {
        println!("{} {}", "✗".red().bold(), report.summary());
        for failure in report.failures() {
            println!("    {} {}", "-".red(), failure);
        }
    }
}
