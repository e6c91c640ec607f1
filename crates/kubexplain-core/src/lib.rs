//! Kubexplain Core - Kubernetes manifest analysis
//!
//! This crate provides the building blocks behind the `kubexplain` CLI:
//! - `document`: multi-document YAML parsing
//! - `Resource`: decoded Kubernetes objects
//! - `Explainer`: field explanations, tree walking and summaries
//! - `validate`: structural rules per kind and deprecated API detection
//! - `generate`: manifest templates for common resource types
//! - `Values`: generator configuration with deep merge support
//! - `analysis`: end-to-end pipelines over raw manifest text

pub mod analysis;
pub mod document;
pub mod error;
pub mod explain;
pub mod generate;
pub mod resource;
pub mod validate;
pub mod values;

pub use analysis::{
    EnhanceError, ExplanationReport, SummaryEnhancer, explain_manifest, explain_manifest_with,
    parse_manifest, validate_manifest,
};
pub use document::{Document, parse_documents};
pub use error::{CoreError, Result};
pub use explain::{
    CompositeKind, ExplanationSource, Explainer, FieldExplanation, FieldValue, MatchPolicy,
};
pub use generate::{ResourceType, generate, generate_manifest};
pub use resource::{Resource, extract_resources};
pub use validate::{Severity, ValidationIssue, ValidationReport, validate_structure};
pub use values::{Values, parse_set_values};
