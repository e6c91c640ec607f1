//! Structural validation of Kubernetes resources
//!
//! A fixed, hand-written rule set per known kind plus a deprecated API check.
//! This is not a schema validator: unknown kinds only get the generic checks.
//!
//! Issues come out in resource order, and within a resource in check order:
//! required identity fields, kind-specific rules, then deprecation.

mod deprecation;
mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::{field, truthy};
use crate::resource::Resource;

pub use deprecation::{DEPRECATED_APIS, DeprecatedApi, find_deprecation};

/// Issue severity levels
///
/// Only [`Severity::Error`] affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted path of the offending field
    pub path: String,
    pub message: String,
    /// How to fix it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn error(
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn warning(
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Aggregate outcome of validating a set of resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True iff no issue is an error
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: !issues.iter().any(ValidationIssue::is_error),
            issues,
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Validate every resource; a failing resource never stops the next one
pub fn validate_structure(resources: &[Resource]) -> ValidationReport {
    let mut issues = Vec::new();

    for resource in resources {
        let before = issues.len();
        validate_resource(resource, &mut issues);
        tracing::debug!(
            resource = %resource.display_name(),
            issues = issues.len() - before,
            "validated resource"
        );
    }

    ValidationReport::from_issues(issues)
}

fn validate_resource(resource: &Resource, issues: &mut Vec<ValidationIssue>) {
    let kind = resource.kind.as_str();
    let content = &resource.content;
    let name = resource.name.as_deref().unwrap_or("unnamed");

    if kind.is_empty() {
        issues.push(ValidationIssue::error(
            "kind",
            "Missing required field 'kind'",
            "Specify the resource type (e.g., Deployment, Service, Pod)",
        ));
    }

    if resource.api_version.is_empty() {
        issues.push(ValidationIssue::error(
            "apiVersion",
            format!("Missing required field 'apiVersion' in {}", kind),
            "Add apiVersion field (e.g., 'apps/v1', 'v1')",
        ));
    }

    let has_name = field(content, "metadata")
        .and_then(|m| field(m, "name"))
        .is_some_and(truthy);
    if !has_name {
        issues.push(ValidationIssue::error(
            "metadata.name",
            format!("Missing required field 'metadata.name' in {}", kind),
            "Every resource must have a name",
        ));
    }

    match kind {
        "Deployment" => rules::deployment(content, name, issues),
        "Service" => rules::service(content, name, issues),
        "Pod" => rules::pod(content, name, issues),
        "Ingress" => rules::ingress(content, name, issues),
        _ => {}
    }

    if let Some(deprecated) = find_deprecation(kind, &resource.api_version) {
        issues.push(ValidationIssue::warning(
            "apiVersion",
            format!(
                "{} API version '{}' is deprecated",
                kind, resource.api_version
            ),
            format!(
                "Use '{}' instead (removed in Kubernetes {})",
                deprecated.replacement, deprecated.removed_in
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_documents;
    use crate::resource::extract_resources;

    fn validate(yaml: &str) -> ValidationReport {
        validate_structure(&extract_resources(&parse_documents(yaml).unwrap()))
    }

    const VALID_DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
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
"#;

    #[test]
    fn test_valid_deployment() {
        let report = validate(VALID_DEPLOYMENT);
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_missing_name() {
        let report = validate("apiVersion: v1\nkind: ConfigMap\ndata:\n  a: b\n");

        assert!(!report.valid);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, "metadata.name");
        assert_eq!(
            report.issues[0].message,
            "Missing required field 'metadata.name' in ConfigMap"
        );
    }

    #[test]
    fn test_missing_kind_and_api_version_on_direct_resource() {
        let resource = Resource {
            kind: String::new(),
            api_version: String::new(),
            name: None,
            namespace: None,
            content: serde_yaml::from_str("metadata:\n  name: x\n").unwrap(),
        };

        let report = validate_structure(&[resource]);
        let paths: Vec<_> = report.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["kind", "apiVersion"]);
        assert!(!report.valid);
    }

    #[test]
    fn test_deprecated_api_warning() {
        let report = validate(&VALID_DEPLOYMENT.replace("apps/v1", "extensions/v1beta1"));

        assert!(report.valid);
        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.path, "apiVersion");
        assert_eq!(
            issue.message,
            "Deployment API version 'extensions/v1beta1' is deprecated"
        );
        assert_eq!(
            issue.suggestion.as_deref(),
            Some("Use 'apps/v1' instead (removed in Kubernetes 1.16)")
        );
    }

    #[test]
    fn test_current_api_not_flagged() {
        let report = validate(VALID_DEPLOYMENT);
        assert!(!report.issues.iter().any(|i| i.path == "apiVersion"));
    }

    #[test]
    fn test_errors_across_resources_are_kept() {
        let report = validate(
            r#"
apiVersion: v1
kind: Service
metadata:
  name: broken
spec:
  selector:
    app: web
---
apiVersion: v1
kind: Pod
metadata:
  name: also-broken
spec:
  containers: []
"#,
        );

        assert!(!report.valid);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.issues[0].message, "Service 'broken' has no ports defined");
        assert_eq!(report.issues[1].message, "Pod 'also-broken' has no containers defined");
    }

    #[test]
    fn test_warnings_do_not_affect_validity() {
        let report = validate(
            r#"
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: edge
spec:
  tls: []
"#,
        );

        assert!(report.valid);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let resources = extract_resources(
            &parse_documents(&format!(
                "{}\n---\napiVersion: v1\nkind: Pod\nspec:\n  containers:\n    - {{}}\n",
                VALID_DEPLOYMENT.replace("app: web\n    spec", "app: api\n    spec")
            ))
            .unwrap(),
        );

        let first = validate_structure(&resources);
        let second = validate_structure(&resources);
        assert!(!first.issues.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_kind_gets_generic_checks_only() {
        let report = validate("apiVersion: example.com/v1\nkind: Widget\nmetadata:\n  name: w\n");
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_issue_serialization() {
        let issue = ValidationIssue::error("spec", "missing", "add it");
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["severity"], "error");
        assert_eq!(json["suggestion"], "add it");
    }
}
