//! Depth-first traversal collecting field explanations

use serde_yaml::Value;

use super::{ExplanationSource, Explainer, FieldExplanation, FieldValue};
use crate::document::{key_to_string, untag};

impl Explainer {
    /// Explain every field under `node`, in traversal order
    ///
    /// Mapping keys are looked up as `prefix.key`; sequence elements only extend
    /// the path with their index and are never looked up themselves. The root
    /// node produces no entry.
    pub fn walk_and_explain(&self, node: &Value, prefix: &str) -> Vec<FieldExplanation> {
        let mut explanations = Vec::new();
        self.walk(node, prefix, &mut explanations);
        explanations
    }

    fn walk(&self, node: &Value, prefix: &str, out: &mut Vec<FieldExplanation>) {
        match untag(node) {
            Value::Mapping(map) => {
                for (key, value) in map {
                    let current_path = join(prefix, &key_to_string(key));
                    let value = untag(value);

                    if let Some(explanation) = self.explain_field(&current_path) {
                        out.push(FieldExplanation {
                            path: current_path.clone(),
                            value: FieldValue::from_value(value),
                            explanation: explanation.to_string(),
                            source: ExplanationSource::RuleBased,
                        });
                    }

                    if matches!(value, Value::Mapping(_) | Value::Sequence(_)) {
                        self.walk(value, &current_path, out);
                    }
                }
            }
            Value::Sequence(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.walk(item, &join(prefix, &idx.to_string()), out);
                }
            }
            _ => {}
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::{CompositeKind, FIELD_EXPLANATIONS, MatchPolicy};

    fn walk(yaml: &str) -> Vec<FieldExplanation> {
        let doc: Value = serde_yaml::from_str(yaml).unwrap();
        Explainer::new().walk_and_explain(&doc, "")
    }

    fn paths(explanations: &[FieldExplanation]) -> Vec<&str> {
        explanations.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_walk_deployment_order() {
        let explanations = walk(
            r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 3
  template:
    spec:
      containers:
        - name: app
          image: nginx:1.27
"#,
        );

        assert_eq!(
            paths(&explanations),
            vec![
                "metadata",
                "metadata.name",
                "spec",
                "spec.replicas",
                "spec.template",
                "spec.template.spec",
                "spec.template.spec.containers",
                "spec.template.spec.containers.0.name",
                "spec.template.spec.containers.0.image",
            ]
        );
    }

    #[test]
    fn test_walk_values_and_source() {
        let explanations = walk("spec:\n  replicas: 3\n");

        assert_eq!(explanations[0].value, FieldValue::Composite(CompositeKind::Mapping));
        assert_eq!(explanations[1].value, FieldValue::Scalar(Value::from(3)));
        assert!(explanations.iter().all(|e| e.source == ExplanationSource::RuleBased));
        assert_eq!(
            explanations[1].explanation,
            *FIELD_EXPLANATIONS.get("spec.replicas").unwrap()
        );
    }

    #[test]
    fn test_walk_sequence_elements_not_looked_up() {
        let explanations = walk("spec:\n  ports:\n    - port: 80\n    - port: 443\n");

        assert_eq!(
            paths(&explanations),
            vec!["spec", "spec.ports", "spec.ports.0.port", "spec.ports.1.port"]
        );
        assert_eq!(
            explanations[1].value,
            FieldValue::Composite(CompositeKind::Sequence)
        );
    }

    #[test]
    fn test_walk_skips_unexplained_fields() {
        let explanations = walk("apiVersion: v1\nkind: Pod\n");
        assert!(explanations.is_empty());
    }

    #[test]
    fn test_walk_with_prefix() {
        let doc: Value = serde_yaml::from_str("replicas: 2").unwrap();
        let explanations = Explainer::new().walk_and_explain(&doc, "spec");

        assert_eq!(paths(&explanations), vec!["spec.replicas"]);
    }

    #[test]
    fn test_walk_scalar_root() {
        let explanations = Explainer::new().walk_and_explain(&Value::from("text"), "");
        assert!(explanations.is_empty());
    }

    #[test]
    fn test_walk_is_deterministic() {
        let doc: Value = serde_yaml::from_str(
            "metadata:\n  labels:\n    app: web\n    tier: api\ndata:\n  key: value\n",
        )
        .unwrap();
        let explainer = Explainer::with_policy(MatchPolicy::DeclarationOrder);

        assert_eq!(
            explainer.walk_and_explain(&doc, ""),
            explainer.walk_and_explain(&doc, "")
        );
    }
}
