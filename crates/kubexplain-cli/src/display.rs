//! Display formatting for CLI output
//!
//! Provides structured display for:
//! - Extracted resources
//! - Validation issues with hints and a summary line
//! - Field explanations under the manifest summary

use console::style;
use kubexplain_core::{ExplanationReport, ExplanationSource, Resource, Severity, ValidationReport};

/// Print one line per extracted resource
pub fn display_resources(resources: &[Resource]) {
    if resources.is_empty() {
        println!("{} No Kubernetes resources found", style("⚠").yellow());
        return;
    }

    for resource in resources {
        println!(
            "  {} {} {}",
            style("•").cyan(),
            style(resource.display_name()).bold(),
            style(format!("({})", resource.api_version)).dim()
        );
    }

    println!();
    println!(
        "{} Found {} resource(s)",
        style("✓").green().bold(),
        resources.len()
    );
}

/// Print every issue with its path and hint
pub fn display_validation(report: &ValidationReport) {
    for issue in &report.issues {
        let icon = match issue.severity {
            Severity::Error => style("✗").red(),
            Severity::Warning => style("⚠").yellow(),
            Severity::Info => style("ℹ").blue(),
        };

        let path_display = if issue.path.is_empty() {
            String::new()
        } else {
            format!(" at {}", style(&issue.path).dim())
        };

        println!("  {} {}{}", icon, issue.message, path_display);

        if let Some(suggestion) = &issue.suggestion {
            println!("    {} {}", style("hint:").blue(), suggestion);
        }
    }
}

/// Print summary line
pub fn print_validation_summary(report: &ValidationReport) {
    let errors = report.error_count();
    let warnings = report.warning_count();

    if errors > 0 {
        println!(
            "{} Validation failed: {} error(s), {} warning(s)",
            style("✗").red().bold(),
            errors,
            warnings
        );
    } else if warnings > 0 {
        println!(
            "{} Validation passed with {} warning(s)",
            style("⚠").yellow().bold(),
            warnings
        );
    } else {
        println!("{} Validation passed!", style("✓").green().bold());
    }
}

/// Print the summary followed by each explained field
pub fn display_explanations(report: &ExplanationReport, summary_only: bool) {
    let heading = if report.llm_used {
        "Summary (enhanced)"
    } else {
        "Summary"
    };
    println!("{}", style(heading).cyan().bold());
    println!("{}", report.summary);

    if summary_only {
        return;
    }

    println!();
    println!(
        "{} ({})",
        style("Fields").cyan().bold(),
        rule_based_count(report)
    );

    for explanation in &report.explanations {
        if explanation.source == ExplanationSource::Llm {
            continue;
        }

        println!(
            "  {} {} {}",
            style("→").blue(),
            style(&explanation.path).bold(),
            style(format!("= {}", explanation.value)).dim()
        );
        println!("    {}", explanation.explanation);
    }
}

/// Number of explanations listed under "Fields"
fn rule_based_count(report: &ExplanationReport) -> usize {
    report
        .explanations
        .iter()
        .filter(|e| e.source == ExplanationSource::RuleBased)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubexplain_core::{EnhanceError, Explainer, FieldExplanation};

    const MANIFEST: &str = "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\nspec:\n  ports:\n    - port: 80\n";

    #[test]
    fn test_field_count_excludes_enhanced_summary() {
        let enhancer = |_: &[Resource], _: &[FieldExplanation]| -> Result<String, EnhanceError> {
            Ok("A single web service.".to_string())
        };

        let plain = kubexplain_core::explain_manifest(MANIFEST, &Explainer::new()).unwrap();
        let enhanced =
            kubexplain_core::explain_manifest_with(MANIFEST, &Explainer::new(), &enhancer).unwrap();

        assert!(enhanced.llm_used);
        assert_eq!(enhanced.explanations.len(), plain.explanations.len() + 1);
        assert_eq!(rule_based_count(&enhanced), plain.explanations.len());
        assert_eq!(rule_based_count(&plain), plain.explanations.len());
    }
}
