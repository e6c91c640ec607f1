//! Kind-specific structural rules
//!
//! Each rule stops at a missing or empty `spec`, since nothing below it can be
//! checked.

use serde_yaml::Value;

use super::ValidationIssue;
use crate::document::{field, scalar_to_string, truthy, untag};

/// `spec` when it is present and non-empty
fn spec_of<'a>(
    content: &'a Value,
    kind: &str,
    name: &str,
    suggestion: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a Value> {
    match field(content, "spec") {
        Some(spec) if truthy(spec) => Some(spec),
        _ => {
            issues.push(ValidationIssue::error(
                "spec",
                format!("{} '{}' missing spec field", kind, name),
                suggestion,
            ));
            None
        }
    }
}

fn has_key(value: &Value, key: &str) -> bool {
    match untag(value) {
        Value::Mapping(map) => map.contains_key(key),
        _ => false,
    }
}

fn is_set(value: &Value, key: &str) -> bool {
    field(value, key).is_some_and(truthy)
}

pub(super) fn deployment(content: &Value, name: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(spec) = spec_of(
        content,
        "Deployment",
        name,
        "Add spec with selector, replicas, and template",
        issues,
    ) else {
        return;
    };

    if !has_key(spec, "selector") {
        issues.push(ValidationIssue::error(
            "spec.selector",
            format!("Deployment '{}' missing selector", name),
            "Add spec.selector.matchLabels to select pods",
        ));
    }

    let Some(template) = field(spec, "template") else {
        issues.push(ValidationIssue::error(
            "spec.template",
            format!("Deployment '{}' missing pod template", name),
            "Add spec.template with pod specification",
        ));
        return;
    };

    let has_containers = field(template, "spec").is_some_and(|s| is_set(s, "containers"));
    if !has_containers {
        issues.push(ValidationIssue::error(
            "spec.template.spec.containers",
            format!("Deployment '{}' has no containers defined", name),
            "Add at least one container in spec.template.spec.containers",
        ));
    }

    let selector_labels = field(spec, "selector").and_then(|s| field(s, "matchLabels"));
    let template_labels = field(template, "metadata").and_then(|m| field(m, "labels"));

    if let Some(Value::Mapping(selector_labels)) = selector_labels {
        for (key, expected) in selector_labels {
            let actual = template_labels.and_then(|labels| match labels {
                Value::Mapping(map) => map.get(key).map(untag),
                _ => None,
            });
            if actual != Some(untag(expected)) {
                let key = scalar_to_string(key).unwrap_or_default();
                issues.push(ValidationIssue::warning(
                    "spec.selector.matchLabels",
                    format!("Selector label '{}' doesn't match template labels", key),
                    "Ensure selector.matchLabels match template.metadata.labels",
                ));
            }
        }
    }
}

pub(super) fn service(content: &Value, name: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(spec) = spec_of(content, "Service", name, "Add spec with selector and ports", issues)
    else {
        return;
    };

    let external_name = field(spec, "type").and_then(Value::as_str) == Some("ExternalName");
    if !is_set(spec, "selector") && !external_name {
        issues.push(ValidationIssue::warning(
            "spec.selector",
            format!("Service '{}' missing selector", name),
            "Add spec.selector to route traffic to matching pods",
        ));
    }

    if !is_set(spec, "ports") {
        issues.push(ValidationIssue::error(
            "spec.ports",
            format!("Service '{}' has no ports defined", name),
            "Add at least one port in spec.ports",
        ));
    }
}

pub(super) fn pod(content: &Value, name: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(spec) = spec_of(content, "Pod", name, "Add spec with containers", issues) else {
        return;
    };

    let containers = match field(spec, "containers") {
        Some(Value::Sequence(items)) if !items.is_empty() => items.as_slice(),
        _ => {
            issues.push(ValidationIssue::error(
                "spec.containers",
                format!("Pod '{}' has no containers defined", name),
                "Add at least one container in spec.containers",
            ));
            return;
        }
    };

    for (idx, container) in containers.iter().enumerate() {
        let container_name = field(container, "name")
            .filter(|n| truthy(n))
            .and_then(scalar_to_string);

        if container_name.is_none() {
            issues.push(ValidationIssue::error(
                format!("spec.containers[{}].name", idx),
                format!("Container at index {} missing name", idx),
                "Every container must have a unique name",
            ));
        }

        if !is_set(container, "image") {
            let label = container_name.unwrap_or_else(|| idx.to_string());
            issues.push(ValidationIssue::error(
                format!("spec.containers[{}].image", idx),
                format!("Container '{}' missing image", label),
                "Specify the container image to run",
            ));
        }
    }
}

pub(super) fn ingress(content: &Value, name: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(spec) = spec_of(content, "Ingress", name, "Add spec with rules", issues) else {
        return;
    };

    if !is_set(spec, "rules") && !is_set(spec, "defaultBackend") {
        issues.push(ValidationIssue::warning(
            "spec.rules",
            format!("Ingress '{}' has no rules or defaultBackend", name),
            "Add routing rules or a default backend",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Severity;

    fn run(
        rule: fn(&Value, &str, &mut Vec<ValidationIssue>),
        yaml: &str,
    ) -> Vec<ValidationIssue> {
        let content: Value = serde_yaml::from_str(yaml).unwrap();
        let mut issues = Vec::new();
        rule(&content, "demo", &mut issues);
        issues
    }

    fn paths(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn test_deployment_missing_spec_short_circuits() {
        let issues = run(deployment, "kind: Deployment\nspec: {}\n");
        assert_eq!(paths(&issues), vec!["spec"]);
        assert_eq!(issues[0].message, "Deployment 'demo' missing spec field");
    }

    #[test]
    fn test_deployment_missing_selector_and_template() {
        let issues = run(deployment, "spec:\n  replicas: 1\n");
        assert_eq!(paths(&issues), vec!["spec.selector", "spec.template"]);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_deployment_without_containers() {
        let issues = run(
            deployment,
            r#"
spec:
  selector:
    matchLabels:
      app: demo
  template:
    metadata:
      labels:
        app: demo
    spec:
      containers: []
"#,
        );
        assert_eq!(paths(&issues), vec!["spec.template.spec.containers"]);
        assert_eq!(issues[0].message, "Deployment 'demo' has no containers defined");
    }

    #[test]
    fn test_deployment_selector_mismatch_is_warning() {
        let issues = run(
            deployment,
            r#"
spec:
  selector:
    matchLabels:
      app: demo
      tier: web
  template:
    metadata:
      labels:
        app: other
        tier: web
    spec:
      containers:
        - name: demo
          image: demo:1
"#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].path, "spec.selector.matchLabels");
        assert_eq!(
            issues[0].message,
            "Selector label 'app' doesn't match template labels"
        );
    }

    #[test]
    fn test_deployment_selector_label_missing_from_template() {
        let issues = run(
            deployment,
            r#"
spec:
  selector:
    matchLabels:
      app: demo
  template:
    spec:
      containers:
        - name: demo
          image: demo:1
"#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_service_rules() {
        let issues = run(service, "spec:\n  type: ClusterIP\n");
        assert_eq!(paths(&issues), vec!["spec.selector", "spec.ports"]);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].severity, Severity::Error);
    }

    #[test]
    fn test_service_external_name_needs_no_selector() {
        let issues = run(
            service,
            "spec:\n  type: ExternalName\n  externalName: db.example.com\n  ports:\n    - port: 5432\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_service_missing_spec() {
        let issues = run(service, "metadata:\n  name: demo\n");
        assert_eq!(paths(&issues), vec!["spec"]);
        assert_eq!(issues[0].suggestion.as_deref(), Some("Add spec with selector and ports"));
    }

    #[test]
    fn test_pod_without_containers() {
        let issues = run(pod, "spec:\n  restartPolicy: Never\n");
        assert_eq!(paths(&issues), vec!["spec.containers"]);
    }

    #[test]
    fn test_pod_container_missing_image_named() {
        let issues = run(pod, "spec:\n  containers:\n    - name: api\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "spec.containers[0].image");
        assert_eq!(issues[0].message, "Container 'api' missing image");
    }

    #[test]
    fn test_pod_container_missing_image_by_index() {
        let issues = run(
            pod,
            "spec:\n  containers:\n    - name: a\n      image: a:1\n    - command: [sleep]\n",
        );
        assert_eq!(
            paths(&issues),
            vec!["spec.containers[1].name", "spec.containers[1].image"]
        );
        assert_eq!(issues[0].message, "Container at index 1 missing name");
        assert_eq!(issues[1].message, "Container '1' missing image");
    }

    #[test]
    fn test_ingress_with_default_backend() {
        let issues = run(
            ingress,
            "spec:\n  defaultBackend:\n    service:\n      name: web\n      port:\n        number: 80\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_ingress_without_rules() {
        let issues = run(ingress, "spec:\n  rules: []\n  ingressClassName: nginx\n");
        assert_eq!(paths(&issues), vec!["spec.rules"]);
        assert_eq!(issues[0].message, "Ingress 'demo' has no rules or defaultBackend");
    }
}
