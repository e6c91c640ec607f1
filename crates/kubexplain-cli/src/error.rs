//! CLI error types with exit code handling
//!
//! Every command returns [`CliError`], which carries both a miette diagnostic
//! and the process exit code.

use kubexplain_core::CoreError;
use kubexplain_core::generate::ResourceType;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Manifest could not be parsed or held no resources
    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(kubexplain::cli::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Structural validation reported problems
    #[error("Validation failed with {errors} error(s) and {warnings} warning(s)")]
    #[diagnostic(code(kubexplain::cli::validation))]
    ValidationFailed { errors: usize, warnings: usize },

    /// Bad arguments, settings or generator configuration
    #[error("{message}")]
    #[diagnostic(code(kubexplain::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Manifest generation failed
    #[error("Generation failed: {message}")]
    #[diagnostic(code(kubexplain::cli::generate))]
    Generation { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kubexplain::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(kubexplain::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Manifest { .. } => exit_codes::ERROR,
            CliError::ValidationFailed { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Generation { .. } => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: None,
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a validation failure error
    pub fn validation_failed(errors: usize, warnings: usize) -> Self {
        Self::ValidationFailed { errors, warnings }
    }

    /// IO error with the offending path in the message
    pub fn io_at(path: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", path, err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::YamlParse(_) => CliError::Manifest {
                message,
                help: Some("Check indentation and quoting around the reported line".to_string()),
            },
            CoreError::NoDocuments => CliError::Manifest {
                message,
                help: Some("The input is empty or only contains comments".to_string()),
            },
            CoreError::NoResources => CliError::Manifest {
                message,
                help: Some("Each resource needs both 'apiVersion' and 'kind'".to_string()),
            },
            CoreError::UnknownResourceType { suggestion, .. } => {
                let supported = ResourceType::ALL.map(|t| t.as_str()).join(", ");
                let help = match suggestion {
                    Some(s) => format!("Did you mean '{}'? Supported types: {}", s, supported),
                    None => format!("Supported types: {}", supported),
                };
                CliError::Usage {
                    message,
                    help: Some(help),
                }
            }
            CoreError::ValuesMerge { .. } | CoreError::JsonParse(_) => CliError::Usage {
                message,
                help: None,
            },
            CoreError::Generation { .. } => CliError::Generation { message },
            CoreError::Io(e) => CliError::from(e),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
