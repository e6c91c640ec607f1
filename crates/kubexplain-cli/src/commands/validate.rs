//! Validate command - structural checks and deprecated API detection

use console::style;

use crate::commands::{print_json, read_input};
use crate::display;
use crate::error::{CliError, Result};

pub fn run(input: &str, json_output: bool, strict: bool) -> Result<()> {
    let content = read_input(input)?;
    let report = kubexplain_core::validate_manifest(&content)?;

    let errors = report.error_count();
    let warnings = report.warning_count();

    if json_output {
        print_json(&serde_json::json!({
            "valid": report.valid,
            "errors": errors,
            "warnings": warnings,
            "issues": report.issues,
        }))?;
    } else {
        println!("{} Validating {}", style("→").blue(), input);
        display::display_validation(&report);
        println!();
        display::print_validation_summary(&report);
    }

    if !report.valid || (strict && warnings > 0) {
        return Err(CliError::validation_failed(errors, warnings));
    }

    Ok(())
}
