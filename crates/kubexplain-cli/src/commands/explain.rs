//! Explain command - field explanations and a manifest summary

use kubexplain_core::{Explainer, MatchPolicy};

use crate::commands::{print_json, read_input};
use crate::display;
use crate::error::Result;

pub fn run(input: &str, policy: MatchPolicy, json_output: bool, summary_only: bool) -> Result<()> {
    let content = read_input(input)?;
    let explainer = Explainer::with_policy(policy);
    let report = kubexplain_core::explain_manifest(&content, &explainer)?;

    if json_output {
        if summary_only {
            return print_json(&serde_json::json!({
                "summary": report.summary,
                "llm_used": report.llm_used,
            }));
        }
        return print_json(&report);
    }

    display::display_explanations(&report, summary_only);
    Ok(())
}
