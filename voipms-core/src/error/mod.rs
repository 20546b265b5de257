use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unable to auto-detect document format (neither valid JSON nor valid YAML)")]
    UnknownFormat,
}

#[derive(Debug, Error)]
#[error("validation failed ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Identifies the workflow node an operation error originated from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeRef {
    pub name: String,
    pub node_type: String,
}

impl NodeRef {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.node_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationErrorKind {
    #[error("No credentials got returned!")]
    MissingCredentials,
    #[error("The resource/operation combination \"{resource}/{operation}\" is not implemented.")]
    UnimplementedOperation { resource: String, operation: String },
    #[error("VoIP.ms API request failed: {message}")]
    RequestFailed { message: String },
}

/// The single host-level error raised by a node execution. The whole batch
/// fails with the first one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct NodeOperationError {
    pub node: NodeRef,
    /// Index of the input item being processed when the error was raised.
    pub item_index: Option<usize>,
    pub kind: OperationErrorKind,
}

impl NodeOperationError {
    pub fn new(node: NodeRef, kind: OperationErrorKind) -> Self {
        Self {
            node,
            item_index: None,
            kind,
        }
    }

    pub fn at_item(mut self, item_index: usize) -> Self {
        self.item_index = Some(item_index);
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
