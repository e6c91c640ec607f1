//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("No valid YAML documents found")]
    NoDocuments,

    #[error("No valid Kubernetes resources found")]
    NoResources,

    #[error("Unknown resource type: {resource_type}")]
    UnknownResourceType {
        resource_type: String,
        suggestion: Option<String>,
    },

    #[error("Generation error: {message}")]
    Generation { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Values merge error: {message}")]
    ValuesMerge { message: String },
}

impl CoreError {
    /// Whether the input was well-formed YAML that simply held nothing usable
    ///
    /// Lets callers tell syntax errors apart from semantic emptiness.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, CoreError::NoDocuments | CoreError::NoResources)
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
