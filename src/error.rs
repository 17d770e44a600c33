// SPDX-License-Identifier: MIT

//! Typed error handling for nl2sql-rs
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is [`Nl2SqlError`]. Pipeline construction problems get their own enum so
//! callers can match on them without string inspection.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Nl2SqlError>;

/// Top-level error type for nl2sql-rs
#[derive(Debug, Error)]
pub enum Nl2SqlError {
    /// Pipeline definition or construction errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// A node failed while transforming the state
    #[error("Node '{node}' failed: {message}")]
    Node { node: String, message: String },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while loading or validating a pipeline definition
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    /// Two nodes share the same id
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    /// A node depends on an id that is not declared
    #[error("Node '{node}' depends on unknown node '{dependency}'")]
    UnknownDependency { node: String, dependency: String },

    /// Circular dependency detected in the pipeline graph
    #[error("Circular dependency detected: {0:?}")]
    CircularDependency(Vec<String>),

    /// Pipeline file does not exist
    #[error("Pipeline file not found: {0}")]
    FileNotFound(String),
}

impl Nl2SqlError {
    /// Create a node failure
    pub fn node(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Node {
            node: node.into(),
            message: message.into(),
        }
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
