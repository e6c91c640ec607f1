//! Kubernetes resource extraction
//!
//! Filters parsed documents down to objects that carry both `kind` and
//! `apiVersion`, capturing their identity fields. Anything else is dropped
//! without an error.

use serde::Serialize;
use serde_yaml::Value;

use crate::document::{Document, field, scalar_to_string, untag};

/// A decoded Kubernetes object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    /// Resource kind (e.g. `Deployment`)
    pub kind: String,
    /// API version (e.g. `apps/v1`)
    pub api_version: String,
    /// `metadata.name`, if present
    pub name: Option<String>,
    /// `metadata.namespace`, if present
    pub namespace: Option<String>,
    /// The full document
    pub content: Value,
}

impl Resource {
    /// Build a resource from a single document
    ///
    /// Returns `None` for non-mapping documents and for mappings missing a
    /// non-empty `kind` or `apiVersion`.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let doc = untag(doc);
        if !doc.is_mapping() {
            return None;
        }

        let kind = field(doc, "kind").and_then(scalar_to_string)?;
        let api_version = field(doc, "apiVersion").and_then(scalar_to_string)?;
        if kind.is_empty() || api_version.is_empty() {
            return None;
        }

        let metadata = field(doc, "metadata");
        let name = metadata
            .and_then(|m| field(m, "name"))
            .and_then(scalar_to_string);
        let namespace = metadata
            .and_then(|m| field(m, "namespace"))
            .and_then(scalar_to_string);

        Some(Self {
            kind,
            api_version,
            name,
            namespace,
            content: doc.clone(),
        })
    }

    /// Get display name for logging
    pub fn display_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("unnamed");
        match &self.namespace {
            Some(ns) => format!("{}/{}/{}", ns, self.kind, name),
            None => format!("{}/{}", self.kind, name),
        }
    }
}

/// Extract resources from parsed documents, preserving document order
pub fn extract_resources(documents: &[Document]) -> Vec<Resource> {
    documents
        .iter()
        .enumerate()
        .filter_map(|(index, doc)| {
            let resource = Resource::from_document(doc);
            if resource.is_none() {
                tracing::debug!(index, "document is not a Kubernetes resource, skipping");
            }
            resource
        })
        .collect()
}
