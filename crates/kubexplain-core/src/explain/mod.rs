//! Rule-based field explanations
//!
//! - [`Explainer::explain_field`]: one dotted path to its explanation
//! - [`Explainer::walk_and_explain`]: every explained field of a tree, in traversal order
//! - [`Explainer::generate_summary`]: one line per resource, with kind descriptions

mod path;
mod table;
mod walk;

use std::fmt;

use serde::{Serialize, Serializer};
use serde_yaml::Value;

use crate::document::scalar_to_string;
use crate::resource::Resource;

pub use path::{MatchPolicy, lookup, normalize_path};
pub use table::{FIELD_EXPLANATIONS, KEYWORD_FALLBACKS, RESOURCE_DESCRIPTIONS};

/// Summary returned when there is nothing to describe
pub const EMPTY_SUMMARY: &str = "No resources found in the manifest.";

/// Where an explanation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplanationSource {
    RuleBased,
    Llm,
}

impl ExplanationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule-based",
            Self::Llm => "llm",
        }
    }
}

/// Shape of a value that is not shown inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Mapping,
    Sequence,
}

impl CompositeKind {
    /// Placeholder shown instead of the nested value
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Mapping => "<mapping>",
            Self::Sequence => "<sequence>",
        }
    }
}

/// The value attached to an explained field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Composite(CompositeKind),
}

impl FieldValue {
    /// Capture a value, collapsing mappings and sequences to their kind
    pub fn from_value(value: &Value) -> Self {
        match crate::document::untag(value) {
            Value::Mapping(_) => Self::Composite(CompositeKind::Mapping),
            Value::Sequence(_) => Self::Composite(CompositeKind::Sequence),
            scalar => Self::Scalar(scalar.clone()),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => match scalar_to_string(value) {
                Some(s) => f.write_str(&s),
                None => f.write_str("null"),
            },
            Self::Composite(kind) => f.write_str(kind.placeholder()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => value.serialize(serializer),
            Self::Composite(kind) => serializer.serialize_str(kind.placeholder()),
        }
    }
}

/// One explained field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldExplanation {
    /// Dotted path, array elements addressed by index
    pub path: String,
    pub value: FieldValue,
    pub explanation: String,
    pub source: ExplanationSource,
}

/// Rule-based explainer over the static tables
///
/// Holds no state beyond the fallback policy, so one instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explainer {
    policy: MatchPolicy,
}

impl Explainer {
    /// Explainer with the default [`MatchPolicy`]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Explanation for a single field path, `None` when nothing applies
    ///
    /// Only the path is consulted. The field's value never changes which
    /// text is chosen, so callers need not pass it.
    pub fn explain_field(&self, path: &str) -> Option<&'static str> {
        lookup(path, self.policy)
    }

    /// High-level description of a resource kind
    pub fn explain_resource(&self, kind: &str) -> Option<&'static str> {
        RESOURCE_DESCRIPTIONS.get(kind).copied()
    }

    /// Explanations for every resource's content, concatenated in resource order
    pub fn explain_resources(&self, resources: &[Resource]) -> Vec<FieldExplanation> {
        resources
            .iter()
            .flat_map(|resource| self.walk_and_explain(&resource.content, ""))
            .collect()
    }

    /// Summary of all resources in the manifest
    pub fn generate_summary(&self, resources: &[Resource]) -> String {
        if resources.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let mut parts = vec!["This Kubernetes manifest contains:".to_string()];

        for (idx, resource) in resources.iter().enumerate() {
            parts.push(format!(
                "\n{}. **{}** named '{}'",
                idx + 1,
                resource.kind,
                resource.name.as_deref().unwrap_or("unnamed")
            ));
            if let Some(desc) = self.explain_resource(&resource.kind) {
                parts.push(format!("   - {}", desc));
            }
        }

        parts.join("\n")
    }
}
