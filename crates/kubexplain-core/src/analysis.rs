//! End-to-end manifest pipelines
//!
//! Each entry point takes raw manifest text and runs parse, extract and then
//! validation, explanation or summary generation. Explanations can be
//! post-processed by an optional [`SummaryEnhancer`], which never turns a
//! successful analysis into a failure.

use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::document::parse_documents;
use crate::error::{CoreError, Result};
use crate::explain::{ExplanationSource, Explainer, FieldExplanation, FieldValue};
use crate::resource::{Resource, extract_resources};
use crate::validate::{ValidationReport, validate_structure};

/// Path of the synthetic entry carrying an enhanced summary
pub const ENHANCED_SUMMARY_PATH: &str = "_llm_summary";

/// Failure reported by a [`SummaryEnhancer`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EnhanceError {
    pub message: String,
}

impl EnhanceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces a free-form summary from the rule-based results
///
/// Implementations typically call out to a language model. An error or an
/// empty summary leaves the rule-based report untouched.
pub trait SummaryEnhancer {
    fn enhance(
        &self,
        resources: &[Resource],
        explanations: &[FieldExplanation],
    ) -> std::result::Result<String, EnhanceError>;
}

impl<F> SummaryEnhancer for F
where
    F: Fn(&[Resource], &[FieldExplanation]) -> std::result::Result<String, EnhanceError>,
{
    fn enhance(
        &self,
        resources: &[Resource],
        explanations: &[FieldExplanation],
    ) -> std::result::Result<String, EnhanceError> {
        self(resources, explanations)
    }
}

/// Result of explaining a manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationReport {
    pub resources: Vec<Resource>,
    pub explanations: Vec<FieldExplanation>,
    pub summary: String,
    /// Whether the summary came from a [`SummaryEnhancer`]
    pub llm_used: bool,
}

/// Parse manifest text into resources
///
/// A manifest whose documents are all non-resources yields an empty list.
pub fn parse_manifest(content: &str) -> Result<Vec<Resource>> {
    let documents = parse_documents(content)?;
    Ok(extract_resources(&documents))
}

fn parse_resources(content: &str) -> Result<Vec<Resource>> {
    let resources = parse_manifest(content)?;
    if resources.is_empty() {
        return Err(CoreError::NoResources);
    }
    Ok(resources)
}

/// Parse and structurally validate manifest text
pub fn validate_manifest(content: &str) -> Result<ValidationReport> {
    let resources = parse_resources(content)?;
    let report = validate_structure(&resources);

    tracing::debug!(
        resources = resources.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated manifest"
    );

    Ok(report)
}

/// Explain every resource in manifest text with the rule-based engine
pub fn explain_manifest(content: &str, explainer: &Explainer) -> Result<ExplanationReport> {
    let resources = parse_resources(content)?;
    let explanations = explainer.explain_resources(&resources);
    let summary = explainer.generate_summary(&resources);

    tracing::debug!(
        resources = resources.len(),
        explanations = explanations.len(),
        policy = %explainer.policy(),
        "explained manifest"
    );

    Ok(ExplanationReport {
        resources,
        explanations,
        summary,
        llm_used: false,
    })
}

/// Explain manifest text, then let `enhancer` replace the summary
pub fn explain_manifest_with(
    content: &str,
    explainer: &Explainer,
    enhancer: &dyn SummaryEnhancer,
) -> Result<ExplanationReport> {
    let mut report = explain_manifest(content, explainer)?;

    match enhancer.enhance(&report.resources, &report.explanations) {
        Ok(summary) if !summary.trim().is_empty() => {
            report.explanations.insert(
                0,
                FieldExplanation {
                    path: ENHANCED_SUMMARY_PATH.to_string(),
                    value: FieldValue::Scalar(Value::String(String::new())),
                    explanation: summary.clone(),
                    source: ExplanationSource::Llm,
                },
            );
            report.summary = summary;
            report.llm_used = true;
        }
        Ok(_) => {
            tracing::debug!("enhancer returned an empty summary, keeping rule-based summary");
        }
        Err(e) => {
            tracing::warn!(error = %e, "summary enhancement failed, keeping rule-based summary");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Enhanced = std::result::Result<String, EnhanceError>;

    const MANIFEST: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: shop
spec:
  replicas: 2
  selector:
    matchLabels:
      app: web
  template:
    metadata:
      labels:
        app: web
    spec:
      containers:
        - name: web
          image: nginx:1.27
---
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  selector:
    app: web
  ports:
    - port: 80
"#;

    #[test]
    fn test_parse_manifest() {
        let resources = parse_manifest(MANIFEST).unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].display_name(), "shop/Deployment/web");
        assert_eq!(resources[1].kind, "Service");
    }

    #[test]
    fn test_parse_manifest_without_resources_is_ok() {
        let resources = parse_manifest("just: data\n").unwrap();
        assert!(resources.is_empty());
    }

    #[test]
    fn test_parse_manifest_empty_text() {
        let err = parse_manifest("").unwrap_err();
        assert_eq!(err.to_string(), "No valid YAML documents found");
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_parse_manifest_syntax_error() {
        let err = parse_manifest("key: [unclosed").unwrap_err();
        assert!(matches!(err, CoreError::YamlParse(_)));
        assert!(err.to_string().starts_with("YAML parsing error: "));
    }

    #[test]
    fn test_validate_manifest() {
        let report = validate_manifest(MANIFEST).unwrap();
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_validate_manifest_requires_resources() {
        let err = validate_manifest("foo: bar\n").unwrap_err();
        assert!(matches!(err, CoreError::NoResources));
        assert_eq!(err.to_string(), "No valid Kubernetes resources found");
    }

    #[test]
    fn test_explain_manifest() {
        let report = explain_manifest(MANIFEST, &Explainer::new()).unwrap();

        assert_eq!(report.resources.len(), 2);
        assert!(!report.llm_used);
        assert!(report.summary.starts_with("This Kubernetes manifest contains:"));
        assert!(report.summary.contains("1. **Deployment** named 'web'"));
        assert!(report.summary.contains("2. **Service** named 'web'"));
        assert!(
            report
                .explanations
                .iter()
                .all(|e| e.source == ExplanationSource::RuleBased)
        );

        let first_service = report
            .explanations
            .iter()
            .position(|e| e.path == "spec.ports")
            .unwrap();
        let last_deployment = report
            .explanations
            .iter()
            .rposition(|e| e.path.starts_with("spec.template"))
            .unwrap();
        assert!(last_deployment < first_service);
    }

    #[test]
    fn test_explain_manifest_requires_resources() {
        let err = explain_manifest("---\n- a\n- b\n", &Explainer::new()).unwrap_err();
        assert!(matches!(err, CoreError::NoResources));
    }

    #[test]
    fn test_enhancer_replaces_summary() {
        let calls = Cell::new(0);
        let enhancer = |resources: &[Resource], explanations: &[FieldExplanation]| -> Enhanced {
            calls.set(calls.get() + 1);
            assert_eq!(resources.len(), 2);
            assert!(!explanations.is_empty());
            Ok("A web deployment behind a service.".to_string())
        };

        let rule_based = explain_manifest(MANIFEST, &Explainer::new()).unwrap();
        let report = explain_manifest_with(MANIFEST, &Explainer::new(), &enhancer).unwrap();

        assert_eq!(calls.get(), 1);
        assert!(report.llm_used);
        assert_eq!(report.summary, "A web deployment behind a service.");
        assert_eq!(report.explanations.len(), rule_based.explanations.len() + 1);

        let first = &report.explanations[0];
        assert_eq!(first.path, ENHANCED_SUMMARY_PATH);
        assert_eq!(first.source, ExplanationSource::Llm);
        assert_eq!(first.explanation, report.summary);
        assert_eq!(first.value.to_string(), "");
        assert_eq!(&report.explanations[1..], &rule_based.explanations[..]);
    }

    #[test]
    fn test_enhancer_failure_keeps_rule_based_report() {
        let enhancer = |_: &[Resource], _: &[FieldExplanation]| -> Enhanced {
            Err(EnhanceError::new("connection refused"))
        };

        let rule_based = explain_manifest(MANIFEST, &Explainer::new()).unwrap();
        let report = explain_manifest_with(MANIFEST, &Explainer::new(), &enhancer).unwrap();

        assert_eq!(report, rule_based);
    }

    #[test]
    fn test_enhancer_empty_summary_ignored() {
        let enhancer = |_: &[Resource], _: &[FieldExplanation]| -> Enhanced { Ok("  \n".to_string()) };

        let report = explain_manifest_with(MANIFEST, &Explainer::new(), &enhancer).unwrap();

        assert!(!report.llm_used);
        assert!(report.summary.starts_with("This Kubernetes manifest contains:"));
    }

    #[test]
    fn test_enhancer_not_called_on_parse_failure() {
        let calls = Cell::new(0);
        let enhancer = |_: &[Resource], _: &[FieldExplanation]| -> Enhanced {
            calls.set(calls.get() + 1);
            Ok("unused".to_string())
        };

        assert!(explain_manifest_with("", &Explainer::new(), &enhancer).is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_report_serializes() {
        let report = explain_manifest(MANIFEST, &Explainer::new()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["llm_used"], false);
        assert_eq!(json["resources"][0]["kind"], "Deployment");
        assert_eq!(json["resources"][0]["api_version"], "apps/v1");
    }
}
