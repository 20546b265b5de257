#![forbid(unsafe_code)]

//! Declarative half of the VoIP.ms connector: the credential and node
//! schemas a workflow host registers, the operation table, and the item model
//! shared with `voipms-exec`.

pub mod dispatch;
pub mod error;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::dispatch::{lookup, Operation, OperationDescriptor, Resource, OPERATIONS};
pub use crate::error::{
    NodeOperationError, NodeRef, OperationErrorKind, ParseError, ValidationError, Violation,
};
pub use crate::parser::{parse_items_str, DocumentFormat, ParsedItems};
pub use crate::types::{
    CredentialBundle, CredentialDescriptor, InvocationItem, NodeDescription, OutputRecord,
};
pub use crate::validate::{validate_credentials, validate_items, Validate};
