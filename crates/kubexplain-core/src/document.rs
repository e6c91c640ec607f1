//! Manifest parsing
//!
//! Turns raw manifest text into an ordered list of YAML documents. Multi-document
//! streams separated by `---` are supported; documents that load as null (empty
//! or comment-only) are skipped.

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{CoreError, Result};

/// One parsed YAML document unit
pub type Document = Value;

/// Parse manifest text into its non-empty documents
///
/// Returns [`CoreError::NoDocuments`] when nothing but null documents remain and
/// [`CoreError::YamlParse`] when the text is not valid YAML.
pub fn parse_documents(content: &str) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for (index, deserializer) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let doc = Value::deserialize(deserializer)?;
        if doc.is_null() {
            tracing::debug!(index, "skipping empty document");
            continue;
        }
        documents.push(doc);
    }

    if documents.is_empty() {
        return Err(CoreError::NoDocuments);
    }

    Ok(documents)
}

/// Strip any YAML tags (`!Foo value`) down to the tagged value
pub(crate) fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Whether a value counts as "set" for presence checks
///
/// Null, `false`, zero, empty strings and empty collections are all unset.
pub(crate) fn truthy(value: &Value) -> bool {
    match untag(value) {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(_) => true,
    }
}

/// Look up a string key in a mapping value
pub(crate) fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match untag(value) {
        Value::Mapping(map) => map.get(key).map(untag),
        _ => None,
    }
}

/// Render a mapping key as a path segment
pub(crate) fn key_to_string(key: &Value) -> String {
    match untag(key) {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Render a scalar as text, `None` for null and collections
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_document() {
        let docs = parse_documents(
            r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(field(&docs[0], "kind").unwrap(), "ConfigMap");
    }

    #[test]
    fn test_parse_multi_document_skips_empty() {
        let docs = parse_documents(
            r#"
---
apiVersion: v1
kind: Service
metadata:
  name: web
---
# only a comment
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(field(&docs[0], "kind").unwrap(), "Service");
        assert_eq!(field(&docs[1], "kind").unwrap(), "Deployment");
    }

    #[test]
    fn test_parse_empty_text() {
        let err = parse_documents("").unwrap_err();
        assert!(matches!(err, CoreError::NoDocuments));
        assert_eq!(err.to_string(), "No valid YAML documents found");
    }

    #[test]
    fn test_parse_only_separators() {
        let err = parse_documents("---\n---\n").unwrap_err();
        assert!(matches!(err, CoreError::NoDocuments));
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = parse_documents("kind: [Deployment\nmetadata: {").unwrap_err();
        assert!(matches!(err, CoreError::YamlParse(_)));
        assert!(err.to_string().starts_with("YAML parsing error: "));
    }

    #[test]
    fn test_parse_keeps_non_mapping_documents() {
        let docs = parse_documents("- a\n- b\n---\njust text\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].is_sequence());
        assert!(docs[1].is_string());
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&Value::String(String::new())));
        assert!(!truthy(&serde_yaml::from_str::<Value>("{}").unwrap()));
        assert!(!truthy(&serde_yaml::from_str::<Value>("[]").unwrap()));
        assert!(!truthy(&serde_yaml::from_str::<Value>("0").unwrap()));
        assert!(truthy(&serde_yaml::from_str::<Value>("3").unwrap()));
        assert!(truthy(&serde_yaml::from_str::<Value>("[1]").unwrap()));
    }

    #[test]
    fn test_key_to_string() {
        assert_eq!(key_to_string(&Value::String("app".into())), "app");
        assert_eq!(key_to_string(&serde_yaml::from_str::<Value>("8080").unwrap()), "8080");
        assert_eq!(key_to_string(&Value::Bool(true)), "true");
    }
}
