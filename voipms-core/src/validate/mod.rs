mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::{CredentialBundle, InvocationItem, NodeDescription};
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CredentialBundle {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_credentials(self)
    }
}

/// Pre-flight check of a batch against the node schema. No network access.
pub fn validate_items(node: &NodeDescription, items: &[InvocationItem]) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_items(node, items);
    v.finish()
}

/// The host's "non-empty" contract for a stored connection.
pub fn validate_credentials(credentials: &CredentialBundle) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_credentials(credentials);
    v.finish()
}
